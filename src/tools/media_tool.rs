use crate::config::RenditionProfile;
use crate::error::{PipelineError, Result};
use crate::tools::ffmpeg_command::{EncodeOptions, FfmpegCommand};
use crate::tools::ffprobe_info::{VideoMetadata, probe_video};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 兩段式 seek 的前置緩衝時間（秒）
const SEEK_MARGIN: f64 = 2.0;

/// 要擷取的畫格
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameSelector {
    /// 第一個可解碼的畫格
    First,
    /// 指定時間點（秒）
    At(f64),
}

/// 一次轉檔中的單一輸出
#[derive(Debug, Clone)]
pub struct RenditionTarget {
    pub profile: RenditionProfile,
    pub output: PathBuf,
}

/// 外部影音工具（ffmpeg / ffprobe）的抽象
///
/// 每個方法都會阻塞直到外部程序結束
pub trait MediaTool {
    /// 確認工具鏈可用，於批次開始前呼叫
    fn check_toolchain(&self) -> Result<()>;

    fn probe(&self, input: &Path) -> Result<VideoMetadata>;

    /// 以單次解碼輸出所有版本
    fn encode_renditions(
        &self,
        input: &Path,
        targets: &[RenditionTarget],
        max_height: u32,
        options: EncodeOptions,
    ) -> Result<()>;

    /// 擷取單一畫格為靜態圖片
    fn extract_frame(
        &self,
        input: &Path,
        selector: FrameSelector,
        output: &Path,
        options: EncodeOptions,
    ) -> Result<()>;
}

/// 透過 PATH 上的 ffmpeg / ffprobe 執行
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegTool;

impl MediaTool for FfmpegTool {
    fn check_toolchain(&self) -> Result<()> {
        for tool in ["ffmpeg", "ffprobe"] {
            let output = Command::new(tool)
                .arg("-version")
                .output()
                .map_err(|e| PipelineError::Toolchain(format!("無法執行 {tool}: {e}")))?;
            if !output.status.success() {
                return Err(PipelineError::Toolchain(format!(
                    "{tool} -version 結束代碼 {}",
                    output.status
                )));
            }
            let version = String::from_utf8_lossy(&output.stdout);
            debug!("{}", version.lines().next().unwrap_or(tool));
        }
        Ok(())
    }

    fn probe(&self, input: &Path) -> Result<VideoMetadata> {
        probe_video(input)
    }

    fn encode_renditions(
        &self,
        input: &Path,
        targets: &[RenditionTarget],
        max_height: u32,
        options: EncodeOptions,
    ) -> Result<()> {
        let outputs: Vec<&Path> = targets.iter().map(|t| t.output.as_path()).collect();
        transcode_command(input, targets, max_height, options).run("transcode", input, &outputs)
    }

    fn extract_frame(
        &self,
        input: &Path,
        selector: FrameSelector,
        output: &Path,
        options: EncodeOptions,
    ) -> Result<()> {
        frame_command(input, selector, output, options).run("extract_frame", input, &[output])
    }
}

/// 限制高度並保持比例；高度取偶數以符合 yuv420p
fn scale_filter(max_height: u32) -> String {
    format!("scale=-2:'min({max_height},trunc(ih/2)*2)'")
}

/// 建立單次解碼、多個輸出的轉檔命令
#[must_use]
pub fn transcode_command(
    input: &Path,
    targets: &[RenditionTarget],
    max_height: u32,
    options: EncodeOptions,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(options).input(input);

    for target in targets {
        let profile = &target.profile;
        cmd = cmd
            .args(["-c:v", profile.video_codec.as_str()])
            .arg("-crf")
            .arg(profile.crf.to_string());
        if let Some(preset) = &profile.preset {
            cmd = cmd.args(["-preset", preset.as_str()]);
        }
        cmd = cmd
            .args(&profile.extra_video_args)
            .arg("-vf")
            .arg(scale_filter(max_height));
        if let Some(audio_codec) = &profile.audio_codec {
            cmd = cmd.args(["-c:a", audio_codec.as_str()]);
        }
        cmd = cmd
            .args(["-b:a", profile.audio_bitrate.as_str()])
            .arg(&target.output);
    }

    cmd
}

/// 建立擷取單一畫格的命令
///
/// 指定時間點時使用兩段式 seek：
/// 1. `-ss` 在 `-i` 前：快速跳轉到最近的關鍵幀
/// 2. `-ss` 在 `-i` 後：精準解碼到目標時間點
#[must_use]
pub fn frame_command(
    input: &Path,
    selector: FrameSelector,
    output: &Path,
    options: EncodeOptions,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new(options);

    match selector {
        FrameSelector::First => {
            cmd = cmd.input(input).args(["-vf", r"select=eq(n\,0)"]);
        }
        FrameSelector::At(timestamp) => {
            let t0 = (timestamp - SEEK_MARGIN).max(0.0);
            let delta = timestamp - t0;

            if t0 > 0.0 {
                cmd = cmd.arg("-ss").arg(format!("{t0:.3}"));
            }
            cmd = cmd.input(input);
            if delta > 0.0 {
                cmd = cmd.arg("-ss").arg(format!("{delta:.3}"));
            }
        }
    }

    cmd = cmd.args(["-frames:v", "1", "-an", "-sn", "-dn", "-update", "1"]);

    let is_jpeg = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    if is_jpeg {
        cmd = cmd.args(["-q:v", "2"]);
    }

    cmd.arg(output)
}
