use crate::config::FfmpegLogLevel;
use crate::error::{PipelineError, Result};
use log::debug;
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// ffmpeg 呼叫的共用參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub log_level: FfmpegLogLevel,
    /// `false` 時使用 `-n`，目標檔案已存在則 ffmpeg 直接失敗
    pub overwrite: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            log_level: FfmpegLogLevel::Error,
            overwrite: true,
        }
    }
}

/// ffmpeg 參數建構器
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    args: Vec<OsString>,
}

impl FfmpegCommand {
    #[must_use]
    pub fn new(options: EncodeOptions) -> Self {
        let mut command = Self { args: Vec::new() };
        command = command.args(["-hide_banner", "-nostdin", "-loglevel"]);
        command = command.arg(options.log_level.as_str());
        command.arg(if options.overwrite { "-y" } else { "-n" })
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub fn input(self, path: &Path) -> Self {
        self.arg("-i").arg(path)
    }

    /// 參數列表（測試與除錯用）
    #[must_use]
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[must_use]
    pub fn build_command(&self) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.args(&self.args);
        cmd
    }

    /// 執行並確認每個預期的輸出檔案都已建立
    pub fn run(&self, step: &'static str, source: &Path, outputs: &[&Path]) -> Result<()> {
        debug!("執行 {step}: ffmpeg {}", self.args_lossy().join(" "));

        let output = self
            .build_command()
            .output()
            .map_err(|e| PipelineError::encode(step, source, format!("無法執行 ffmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("ffmpeg stderr: {}", stderr.trim());
            return Err(PipelineError::encode(
                step,
                source,
                format!("ffmpeg 結束代碼 {}: {}", output.status, stderr.trim()),
            ));
        }

        if let Some(missing) = outputs.iter().find(|path| !path.exists()) {
            return Err(PipelineError::encode(
                step,
                source,
                format!("輸出檔案未建立: {}", missing.display()),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix() {
        let cmd = FfmpegCommand::new(EncodeOptions {
            log_level: FfmpegLogLevel::Quiet,
            overwrite: true,
        });
        assert_eq!(
            cmd.args_lossy(),
            vec!["-hide_banner", "-nostdin", "-loglevel", "quiet", "-y"]
        );
    }

    #[test]
    fn test_no_overwrite_uses_n_flag() {
        let cmd = FfmpegCommand::new(EncodeOptions {
            log_level: FfmpegLogLevel::Info,
            overwrite: false,
        })
        .input(Path::new("/videos/a.mp4"));
        let args = cmd.args_lossy();
        assert!(args.contains(&"-n".to_string()));
        assert!(!args.contains(&"-y".to_string()));
        assert_eq!(&args[args.len() - 2..], ["-i", "/videos/a.mp4"]);
    }
}
