use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 列出要處理的來源影片
///
/// 資料夾：只取第一層中副檔名符合的檔案，依路徑排序；
/// 單一檔案：副檔名符合時回傳自身。
pub fn scan_source_files(input: &Path, config: &PipelineConfig) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if config.is_source_file(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        return Err(PipelineError::MissingSource {
            id: input
                .file_stem()
                .map_or_else(String::new, |s| s.to_string_lossy().to_string()),
            dir: input.parent().unwrap_or(Path::new(".")).to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| config.is_source_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    Ok(files)
}
