use crate::error::{PipelineError, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 單次處理專用的暫存目錄
///
/// 成功時呼叫 [`ScratchDir::close`] 清除並回報錯誤；
/// 其他離開路徑（包含錯誤）由 `Drop` 清除。
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// 在 `parent` 下建立 `.{prefix}_{uuid}` 目錄
    pub fn create_in(parent: &Path, prefix: &str) -> Result<Self> {
        let path = parent.join(format!(".{prefix}_{}", Uuid::new_v4().simple()));
        fs::create_dir_all(&path).map_err(|e| PipelineError::io(&path, e))?;
        Ok(Self {
            path,
            removed: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn close(mut self) -> Result<()> {
        self.removed = true;
        fs::remove_dir_all(&self.path).map_err(|e| PipelineError::io(&self.path, e))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.removed || !self.path.exists() {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            warn!("無法清理暫存目錄 {}: {e}", self.path.display());
        }
    }
}
