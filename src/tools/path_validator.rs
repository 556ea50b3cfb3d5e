use crate::error::{PipelineError, Result};
use std::io;
use std::path::Path;

pub fn validate_path_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PipelineError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "路徑不存在"),
        ));
    }
    Ok(())
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| PipelineError::io(path, e))?;
    }
    Ok(())
}
