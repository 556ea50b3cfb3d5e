use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// 影片 id：來源檔名去掉副檔名
///
/// 非 UTF-8 的檔名會被拒絕，避免不同檔案經有損轉換後得到相同的 id。
pub fn video_id(file: &Path) -> Result<String> {
    file.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PipelineError::InvalidFileName {
            path: file.to_path_buf(),
        })
}

/// 依 id 與允許的副檔名找出實際來源檔
///
/// 一律依設定順序嘗試 `<dir>/<id><ext>`，同一 id 永遠對應同一個檔案。
/// 都不存在時才使用給定路徑本身（例如副檔名大小寫不同）。
pub fn resolve_source(file: &Path, config: &PipelineConfig) -> Result<PathBuf> {
    let id = video_id(file)?;
    let dir = file
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    if let Some(found) = config
        .source_extensions
        .iter()
        .map(|ext| dir.join(format!("{id}{ext}")))
        .find(|candidate| candidate.is_file())
    {
        if found.as_path() != file {
            debug!("{} 解析為 {}", file.display(), found.display());
        }
        return Ok(found);
    }

    if file.is_file() && config.is_source_file(file) {
        return Ok(file.to_path_buf());
    }

    Err(PipelineError::MissingSource { id, dir })
}

/// manifest 中對外公開的路徑：`base_dir` 與檔名以單一 `/` 連接
#[must_use]
pub fn public_path(base_dir: &str, file_name: &str) -> String {
    let base = base_dir.trim_end_matches('/');
    if base_dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{base}/{file_name}")
    }
}

/// 同一版本的所有輸出檔名都帶有 id 與短雜湊
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub renditions: String,
    pub poster: String,
    pub strip: String,
}

impl ArtifactNames {
    #[must_use]
    pub fn new(id: &str, short_digest: &str) -> Self {
        Self {
            renditions: format!("{id}.{short_digest}"),
            poster: format!("{id}_poster.{short_digest}"),
            strip: format!("{id}_strip.{short_digest}"),
        }
    }
}
