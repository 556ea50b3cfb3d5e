use crate::manifest::Manifest;
use std::path::PathBuf;

/// 單一影片的處理結果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    /// 來源未變更，沿用既有的 manifest
    Unchanged { manifest: Manifest },
    /// 已重新產生所有輸出
    Success { manifest: Manifest },
    /// 任一步驟失敗，細節只寫入 log
    Error { file: PathBuf },
}

impl ProcessingResult {
    #[must_use]
    pub const fn manifest(&self) -> Option<&Manifest> {
        match self {
            Self::Unchanged { manifest } | Self::Success { manifest } => Some(manifest),
            Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_successful(&self) -> bool {
        !matches!(self, Self::Error { .. })
    }
}

/// 批次結果，各分類內維持輸入順序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub success: Vec<Manifest>,
    pub unchanged: Vec<Manifest>,
    pub errors: Vec<PathBuf>,
}

impl BatchResult {
    #[must_use]
    pub fn total(&self) -> usize {
        self.success.len() + self.unchanged.len() + self.errors.len()
    }
}

#[must_use]
pub fn collect_results(results: Vec<ProcessingResult>) -> BatchResult {
    results
        .into_iter()
        .fold(BatchResult::default(), |mut batch, result| {
            match result {
                ProcessingResult::Success { manifest } => batch.success.push(manifest),
                ProcessingResult::Unchanged { manifest } => batch.unchanged.push(manifest),
                ProcessingResult::Error { file } => batch.errors.push(file),
            }
            batch
        })
}
