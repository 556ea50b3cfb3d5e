use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// 傳給 ffmpeg `-loglevel` 的等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FfmpegLogLevel {
    Quiet,
    #[default]
    Error,
    Warning,
    Info,
    Verbose,
}

impl FfmpegLogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Verbose => "verbose",
        }
    }
}

impl fmt::Display for FfmpegLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FfmpegLogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "error" => Ok(Self::Error),
            "warning" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            "verbose" => Ok(Self::Verbose),
            other => Err(format!("未知的 ffmpeg log level: {other}")),
        }
    }
}

/// 單一輸出版本的編碼設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionProfile {
    /// 輸出副檔名（不含點），同時決定 ffmpeg 的容器格式
    pub extension: String,
    pub mime_type: String,
    pub video_codec: String,
    pub crf: u8,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub extra_video_args: Vec<String>,
    #[serde(default)]
    pub audio_codec: Option<String>,
    pub audio_bitrate: String,
}

impl RenditionProfile {
    #[must_use]
    pub fn h264_mp4() -> Self {
        Self {
            extension: "mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            video_codec: "libx264".to_string(),
            crf: 23,
            preset: Some("medium".to_string()),
            extra_video_args: Vec::new(),
            audio_codec: Some("aac".to_string()),
            audio_bitrate: "128k".to_string(),
        }
    }

    #[must_use]
    pub fn vp9_webm() -> Self {
        Self {
            extension: "webm".to_string(),
            mime_type: "video/webm".to_string(),
            video_codec: "libvpx-vp9".to_string(),
            crf: 30,
            preset: None,
            extra_video_args: vec!["-b:v".to_string(), "0".to_string()],
            audio_codec: None,
            audio_bitrate: "128k".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PosterFormat {
    #[default]
    Jpg,
    Png,
}

impl PosterFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PosterSettings {
    pub format: PosterFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StripFormat {
    #[default]
    Webp,
    Jpg,
}

impl StripFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpg => "jpg",
        }
    }
}

/// 縮圖條設定：每格高度、取樣數量與輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    pub row_height: u32,
    pub interval_count: u32,
    pub format: StripFormat,
    /// 僅在 `format = jpg` 時使用 (1-100)
    pub jpeg_quality: u8,
}

impl Default for StripSettings {
    fn default() -> Self {
        Self {
            row_height: 100,
            interval_count: 30,
            format: StripFormat::Webp,
            jpeg_quality: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 允許的來源副檔名（含點，不分大小寫），依序嘗試
    pub source_extensions: Vec<String>,
    /// 輸出影片的最大高度，較小的來源不放大
    pub max_height: u32,
    pub renditions: Vec<RenditionProfile>,
    pub poster: PosterSettings,
    pub thumbnail_strip: StripSettings,
    pub ffmpeg_log_level: FfmpegLogLevel,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_extensions: vec![".mp4".to_string(), ".mov".to_string()],
            max_height: 720,
            renditions: vec![RenditionProfile::h264_mp4(), RenditionProfile::vp9_webm()],
            poster: PosterSettings::default(),
            thumbnail_strip: StripSettings::default(),
            ffmpeg_log_level: FfmpegLogLevel::default(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let dotted = format!(".{}", ext.to_lowercase());
                self.source_extensions
                    .iter()
                    .any(|allowed| allowed.to_lowercase() == dotted)
            })
    }
}
