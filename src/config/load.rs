use crate::config::types::PipelineConfig;
use crate::error::PipelineError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// 未指定設定檔時，於工作目錄尋找的預設檔名
pub const DEFAULT_CONFIG_FILE: &str = "pipeline.json";

impl PipelineConfig {
    /// 載入設定檔
    ///
    /// 明確指定的路徑讀取失敗會回傳錯誤；未指定時讀取工作目錄下的
    /// `pipeline.json`，不存在則使用預設值。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.source_extensions.is_empty() {
            return Err(PipelineError::Config("source_extensions 不可為空".to_string()));
        }
        if self.max_height == 0 {
            return Err(PipelineError::Config("max_height 必須大於 0".to_string()));
        }
        if self.renditions.is_empty() {
            return Err(PipelineError::Config("renditions 不可為空".to_string()));
        }

        let mut extensions = HashSet::new();
        for profile in &self.renditions {
            if profile.extension.is_empty() {
                return Err(PipelineError::Config("rendition 副檔名不可為空".to_string()));
            }
            if !extensions.insert(profile.extension.to_lowercase()) {
                return Err(PipelineError::Config(format!(
                    "rendition 副檔名重複: {}",
                    profile.extension
                )));
            }
        }

        let strip = &self.thumbnail_strip;
        if strip.row_height == 0 {
            return Err(PipelineError::Config("row_height 必須大於 0".to_string()));
        }
        if strip.interval_count == 0 {
            return Err(PipelineError::Config("interval_count 必須大於 0".to_string()));
        }
        if !(1..=100).contains(&strip.jpeg_quality) {
            return Err(PipelineError::Config(format!(
                "jpeg_quality 必須介於 1-100: {}",
                strip.jpeg_quality
            )));
        }

        Ok(())
    }
}
