use std::path::PathBuf;
use thiserror::Error;

/// 單一影片處理流程中可能發生的錯誤
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("檔案存取失敗 {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("無法取得影片 {field}（{path}）: {reason}")]
    Probe {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },

    #[error("{step} 失敗（{path}）: {reason}")]
    Encode {
        step: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("manifest 無效 {path}: {reason}")]
    Manifest { path: PathBuf, reason: String },

    #[error("找不到 {id} 的來源影片（{dir}）")]
    MissingSource { id: String, dir: PathBuf },

    #[error("檔名不是有效的 UTF-8，無法作為影片 id: {}", path.display())]
    InvalidFileName { path: PathBuf },

    #[error("缺少外部工具: {0}")]
    Toolchain(String),

    #[error("設定無效: {0}")]
    Config(String),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn probe(path: impl Into<PathBuf>, field: &'static str, reason: impl Into<String>) -> Self {
        Self::Probe {
            path: path.into(),
            field,
            reason: reason.into(),
        }
    }

    pub fn encode(step: &'static str, path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Encode {
            step,
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_names_field() {
        let err = PipelineError::probe("/videos/a.mp4", "fps", "分母為 0");
        let message = err.to_string();
        assert!(message.contains("fps"));
        assert!(message.contains("/videos/a.mp4"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = PipelineError::io("/videos/a.mp4", source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
