use crate::config::PosterFormat;
use crate::error::{PipelineError, Result};
use crate::tools::{EncodeOptions, FrameSelector, MediaTool};
use std::path::Path;

/// 擷取第一個可解碼畫格作為封面
pub struct PosterSynthesizer<'a, T: MediaTool> {
    tool: &'a T,
    format: PosterFormat,
}

impl<'a, T: MediaTool> PosterSynthesizer<'a, T> {
    pub const fn new(tool: &'a T, format: PosterFormat) -> Self {
        Self { tool, format }
    }

    /// 寫入 `<output_dir>/<base_name>.<ext>` 並回傳檔名
    pub fn make_poster(
        &self,
        file: &Path,
        output_dir: &Path,
        base_name: &str,
        options: EncodeOptions,
    ) -> Result<String> {
        let file_name = format!("{base_name}.{}", self.format.extension());
        let poster_path = output_dir.join(&file_name);

        self.tool
            .extract_frame(file, FrameSelector::First, &poster_path, options)?;

        if !poster_path.exists() {
            return Err(PipelineError::encode(
                "poster",
                file,
                format!("封面未建立: {}", poster_path.display()),
            ));
        }

        Ok(file_name)
    }
}
