use crate::config::RenditionProfile;
use crate::error::{PipelineError, Result};
use crate::manifest::Rendition;
use crate::tools::{EncodeOptions, MediaTool, RenditionTarget};
use log::debug;
use std::fs;
use std::path::Path;

/// 將來源影片轉為固定順序的多個輸出版本
pub struct RenditionTranscoder<'a, T: MediaTool> {
    tool: &'a T,
    profiles: &'a [RenditionProfile],
    max_height: u32,
}

impl<'a, T: MediaTool> RenditionTranscoder<'a, T> {
    pub const fn new(tool: &'a T, profiles: &'a [RenditionProfile], max_height: u32) -> Self {
        Self {
            tool,
            profiles,
            max_height,
        }
    }

    /// 輸出 `<output_dir>/<base_name>.<ext>`，回傳的 `path` 為檔名
    ///
    /// 任一輸出缺漏即整體失敗，不回傳部分結果。
    pub fn transcode(
        &self,
        file: &Path,
        output_dir: &Path,
        base_name: &str,
        options: EncodeOptions,
    ) -> Result<Vec<Rendition>> {
        let targets: Vec<RenditionTarget> = self
            .profiles
            .iter()
            .map(|profile| RenditionTarget {
                profile: profile.clone(),
                output: output_dir.join(rendition_file_name(base_name, profile)),
            })
            .collect();

        self.tool
            .encode_renditions(file, &targets, self.max_height, options)?;

        targets
            .iter()
            .map(|target| {
                let byte_size = fs::metadata(&target.output)
                    .map_err(|e| {
                        PipelineError::encode(
                            "transcode",
                            file,
                            format!("輸出檔案未建立 {}: {e}", target.output.display()),
                        )
                    })?
                    .len();
                debug!("{} ({byte_size} bytes)", target.output.display());

                Ok(Rendition {
                    path: rendition_file_name(base_name, &target.profile),
                    mime_type: target.profile.mime_type.clone(),
                    byte_size,
                })
            })
            .collect()
    }
}

#[must_use]
pub fn rendition_file_name(base_name: &str, profile: &RenditionProfile) -> String {
    format!("{base_name}.{}", profile.extension)
}
