use super::frame_extractor::{create_frame_tasks, extract_frames};
use super::strip_compositor::{compose_strip, frame_width, resize_frames, write_strip};
use super::timestamp_sampler::sample_timestamps;
use crate::config::StripSettings;
use crate::error::{PipelineError, Result};
use crate::manifest::ThumbnailStrip;
use crate::tools::{EncodeOptions, MediaTool, ScratchDir};
use log::{debug, warn};
use std::path::Path;

/// 縮圖條生成器
///
/// 四階段流程：
/// A. 取得片長與比例（ffprobe）
/// B. 均勻取樣時間點
/// C. 擷取畫格到暫存目錄
/// D. 縮放並橫向合併
pub struct ThumbnailStripSynthesizer<'a, T: MediaTool> {
    tool: &'a T,
    settings: &'a StripSettings,
}

impl<'a, T: MediaTool> ThumbnailStripSynthesizer<'a, T> {
    pub const fn new(tool: &'a T, settings: &'a StripSettings) -> Self {
        Self { tool, settings }
    }

    /// 產生 `<output_dir>/<base_name>.<ext>`，格式與 JPEG 品質取自設定
    ///
    /// 暫存目錄在成功或失敗時都會被移除。
    pub fn make_strip(
        &self,
        file: &Path,
        output_dir: &Path,
        base_name: &str,
        row_height: u32,
        interval_count: u32,
        options: EncodeOptions,
    ) -> Result<ThumbnailStrip> {
        if row_height == 0 || interval_count == 0 {
            return Err(PipelineError::Config(format!(
                "縮圖條參數必須為正數: row_height={row_height}, intervals={interval_count}"
            )));
        }

        let file_name = format!("{base_name}.{}", self.settings.format.extension());
        let strip_path = output_dir.join(&file_name);
        if !options.overwrite && strip_path.exists() {
            return Err(PipelineError::encode(
                "thumbnail_strip",
                file,
                format!("輸出已存在: {}", strip_path.display()),
            ));
        }

        // 階段 A
        let metadata = self.tool.probe(file)?;
        if metadata.duration <= 0.0 {
            return Err(PipelineError::probe(file, "duration", "片長必須大於 0"));
        }

        // 階段 B
        let timestamps = sample_timestamps(metadata.duration, interval_count);
        let width = frame_width(row_height, metadata.aspect_ratio());
        debug!(
            "縮圖條: {} 格，每格 {width}x{row_height}，片長 {:.3}s",
            timestamps.len(),
            metadata.duration
        );

        // 階段 C
        let scratch = ScratchDir::create_in(output_dir, "strip")?;
        let tasks = create_frame_tasks(&timestamps, scratch.path());
        let frames = extract_frames(self.tool, file, &tasks, options.log_level)?;

        // 階段 D
        let resized = resize_frames(&frames, width, row_height)?;
        let canvas = compose_strip(&resized, width, row_height);
        write_strip(&canvas, &strip_path, self.settings)?;

        if let Err(e) = scratch.close() {
            warn!("{e}");
        }

        Ok(ThumbnailStrip {
            path: file_name,
            interval_count,
            width: canvas.width(),
            height: row_height,
        })
    }
}
