use crate::error::{PipelineError, Result};
use crate::manifest::types::Manifest;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// manifest 檔案路徑：`<directory>/<id>.manifest.json`
#[must_use]
pub fn manifest_path(directory: &Path, id: &str) -> PathBuf {
    directory.join(format!("{id}.manifest.json"))
}

/// 讀取既有的 manifest
///
/// 檔案不存在、無法讀取或結構不符都回傳 `None`，
/// 損壞的紀錄不可被當成快取命中。
#[must_use]
pub fn load_manifest(directory: &Path, id: &str) -> Option<Manifest> {
    let path = manifest_path(directory, id);
    if !path.exists() {
        debug!("manifest 不存在: {}", path.display());
        return None;
    }

    match read_manifest(&path, id) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("忽略無效的 manifest: {e}");
            None
        }
    }
}

fn read_manifest(path: &Path, id: &str) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let manifest: Manifest =
        serde_json::from_str(&content).map_err(|e| PipelineError::Manifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    manifest
        .validate(id)
        .map_err(|reason| PipelineError::Manifest {
            path: path.to_path_buf(),
            reason,
        })?;

    Ok(manifest)
}

/// 以固定欄位順序與 2 格縮排寫入 manifest
///
/// 先寫入同目錄的暫存檔再 rename，讀取端不會看到寫到一半的檔案。
pub fn save_manifest(path: &Path, manifest: Manifest) -> Result<Manifest> {
    let content = serde_json::to_string_pretty(&manifest).map_err(|e| {
        PipelineError::io(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| "manifest.json".to_string(), |n| n.to_string_lossy().to_string());
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content).map_err(|e| PipelineError::io(&temp_path, e))?;
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(PipelineError::io(path, e));
    }

    debug!("manifest 已寫入: {}", path.display());
    Ok(manifest)
}
