use crate::error::{PipelineError, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::Command;

/// 影片本身的屬性；`size` 為來源檔案位元組數
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub fps: f64,
    pub size: u64,
}

impl VideoMetadata {
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

/// 使用 ffprobe 取得影片資訊
pub fn probe_video(path: &Path) -> Result<VideoMetadata> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| PipelineError::probe(path, "stream", format!("無法執行 ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::probe(
            path,
            "stream",
            format!("ffprobe 執行失敗: {}", stderr.trim()),
        ));
    }

    let size = fs::metadata(path)
        .map_err(|e| PipelineError::probe(path, "size", e.to_string()))?
        .len();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let metadata = parse_probe_output(path, &stdout, size)?;
    debug!(
        "{}: {}x{}, {:.2}s, {:.3} fps, {} bytes",
        path.display(),
        metadata.width,
        metadata.height,
        metadata.duration,
        metadata.fps,
        metadata.size
    );
    Ok(metadata)
}

/// 解析 ffprobe JSON 輸出；任一欄位缺漏或格式錯誤即回傳 `Probe` 錯誤
pub fn parse_probe_output(path: &Path, json: &str, size: u64) -> Result<VideoMetadata> {
    let probe: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| PipelineError::probe(path, "stream", format!("無法解析 ffprobe 輸出: {e}")))?;

    // 找到視訊串流
    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| PipelineError::probe(path, "stream", "找不到視訊串流"))?;

    let width = video_stream
        .width
        .filter(|w| *w > 0)
        .ok_or_else(|| PipelineError::probe(path, "width", "缺少或為 0"))?;
    let height = video_stream
        .height
        .filter(|h| *h > 0)
        .ok_or_else(|| PipelineError::probe(path, "height", "缺少或為 0"))?;

    // 影片長度優先取 format，其次取 stream
    let duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.trim().parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| PipelineError::probe(path, "duration", "缺少或無法解析"))?;

    let raw_rate = video_stream
        .r_frame_rate
        .as_deref()
        .ok_or_else(|| PipelineError::probe(path, "fps", "缺少 r_frame_rate"))?;
    let fps = parse_frame_rate(raw_rate)
        .ok_or_else(|| PipelineError::probe(path, "fps", format!("無效的幀率: {raw_rate}")))?;

    Ok(VideoMetadata {
        width,
        height,
        duration,
        fps,
        size,
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"），分母為 0 視為無效
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let rate = rate.trim();
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den == 0.0 {
            return None;
        }
        return Some(num / den).filter(|fps| fps.is_finite());
    }
    rate.parse().ok().filter(|fps: &f64| fps.is_finite())
}
