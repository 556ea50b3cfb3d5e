use serde::{Deserialize, Serialize};

/// 單一輸出版本
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rendition {
    #[serde(rename = "src")]
    pub path: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(rename = "size")]
    pub byte_size: u64,
}

/// 橫向排列的縮圖條
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailStrip {
    #[serde(rename = "src")]
    pub path: String,
    #[serde(rename = "intervals")]
    pub interval_count: u32,
    pub width: u32,
    pub height: u32,
}

/// 每支影片的處理紀錄
///
/// 欄位順序即序列化順序。`hash` 永遠是來源檔案的雜湊。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub hash: String,
    pub sources: Vec<Rendition>,
    pub poster: String,
    pub thumbnails: ThumbnailStrip,
    pub width: u32,
    pub height: u32,
    pub duration: f64,
    pub size: u64,
    pub fps: f64,
}

impl Manifest {
    /// 檢查反序列化後的結構是否可作為快取紀錄
    pub fn validate(&self, expected_id: &str) -> Result<(), String> {
        if self.id != expected_id {
            return Err(format!("id 不符: 預期 {expected_id}，實際 {}", self.id));
        }
        if self.hash.is_empty() {
            return Err("hash 為空".to_string());
        }
        if self.sources.is_empty() {
            return Err("sources 為空".to_string());
        }
        if let Some(source) = self
            .sources
            .iter()
            .find(|s| s.path.is_empty() || s.mime_type.is_empty())
        {
            return Err(format!("rendition 欄位為空: {source:?}"));
        }
        if self.poster.is_empty() {
            return Err("poster 為空".to_string());
        }
        if self.thumbnails.path.is_empty() {
            return Err("thumbnails.src 為空".to_string());
        }
        if !self.duration.is_finite() || !self.fps.is_finite() {
            return Err("duration 或 fps 不是有限數值".to_string());
        }
        Ok(())
    }
}
