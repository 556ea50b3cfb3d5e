//! 測試用的假影音工具，不需要 ffmpeg

#![allow(dead_code)]

use auto_video_optimize::config::PipelineConfig;
use auto_video_optimize::error::{PipelineError, Result};
use auto_video_optimize::tools::{
    EncodeOptions, FrameSelector, MediaTool, RenditionTarget, VideoMetadata,
};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 記錄呼叫並寫出合成檔案的 `MediaTool`
#[derive(Debug)]
pub struct FakeMediaTool {
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub fps: f64,
    /// 第 N 次（從 0 起算）依時間擷取畫格時失敗
    pub fail_frame_at: Option<usize>,
    /// 轉檔成功但不寫出檔案
    pub skip_rendition_output: bool,
    pub toolchain_available: bool,
    pub(crate) frame_calls: AtomicUsize,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl Default for FakeMediaTool {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            duration: 10.0,
            fps: 25.0,
            fail_frame_at: None,
            skip_rendition_output: false,
            toolchain_available: true,
            frame_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeMediaTool {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn guard_overwrite(output: &Path, options: EncodeOptions) -> Result<()> {
        if !options.overwrite && output.exists() {
            return Err(PipelineError::encode(
                "fake",
                output,
                "File exists, refusing to overwrite",
            ));
        }
        Ok(())
    }
}

impl MediaTool for FakeMediaTool {
    fn check_toolchain(&self) -> Result<()> {
        self.record("check_toolchain".to_string());
        if self.toolchain_available {
            Ok(())
        } else {
            Err(PipelineError::Toolchain("ffmpeg not found".to_string()))
        }
    }

    fn probe(&self, input: &Path) -> Result<VideoMetadata> {
        self.record(format!("probe {}", input.display()));
        let size = fs::metadata(input)
            .map_err(|e| PipelineError::probe(input, "size", e.to_string()))?
            .len();
        Ok(VideoMetadata {
            width: self.width,
            height: self.height,
            duration: self.duration,
            fps: self.fps,
            size,
        })
    }

    fn encode_renditions(
        &self,
        input: &Path,
        targets: &[RenditionTarget],
        _max_height: u32,
        options: EncodeOptions,
    ) -> Result<()> {
        self.record(format!("encode {}", input.display()));
        let source = fs::read(input).map_err(|e| PipelineError::io(input, e))?;

        for (index, target) in targets.iter().enumerate() {
            Self::guard_overwrite(&target.output, options)?;
            if self.skip_rendition_output {
                continue;
            }
            let len = source.len() / (index + 2) + 1;
            fs::write(&target.output, vec![b'v'; len])
                .map_err(|e| PipelineError::io(&target.output, e))?;
        }
        Ok(())
    }

    fn extract_frame(
        &self,
        input: &Path,
        selector: FrameSelector,
        output: &Path,
        options: EncodeOptions,
    ) -> Result<()> {
        self.record(format!("frame {selector:?} {}", input.display()));
        Self::guard_overwrite(output, options)?;

        let shade = match selector {
            FrameSelector::First => 0,
            FrameSelector::At(timestamp) => {
                let call = self.frame_calls.fetch_add(1, Ordering::SeqCst);
                if self.fail_frame_at == Some(call) {
                    return Err(PipelineError::encode(
                        "extract_frame",
                        input,
                        format!("decode failed at {timestamp:.3}s"),
                    ));
                }
                (timestamp * 20.0).clamp(0.0, 255.0) as u8
            }
        };

        RgbImage::from_pixel(64, 36, Rgb([shade, 128, 255 - shade]))
            .save(output)
            .map_err(|e| PipelineError::encode("extract_frame", output, e.to_string()))
    }
}

/// 測試用設定：縮圖條只取 5 格
pub fn test_config() -> PipelineConfig {
    let mut config = PipelineConfig::default();
    config.thumbnail_strip.interval_count = 5;
    config
}

pub fn write_source(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// 輸出資料夾中殘留的暫存目錄
pub fn scratch_dirs(output_dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(output_dir)
        .unwrap()
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with(".strip_"))
        })
        .collect()
}
