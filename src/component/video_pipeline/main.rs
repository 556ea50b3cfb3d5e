use super::paths::{ArtifactNames, public_path, resolve_source, video_id};
use super::report::{format_bytes, rendition_savings};
use super::result::{BatchResult, ProcessingResult, collect_results};
use crate::component::renditions::{PosterSynthesizer, RenditionTranscoder};
use crate::component::thumbnail_strip::ThumbnailStripSynthesizer;
use crate::config::{FfmpegLogLevel, PipelineConfig};
use crate::error::Result;
use crate::manifest::{
    Manifest, Rendition, ThumbnailStrip, load_manifest, manifest_path, save_manifest,
};
use crate::tools::{
    EncodeOptions, MediaTool, ensure_directory_exists, hash_file, validate_path_exists,
};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// 逐支影片的處理流程
///
/// Resolve → Hash → CacheCheck → Transcode → Poster → Thumbnails
/// → Probe → Assemble → Persist。任一步驟失敗即為 `Error`。
pub struct VideoPipeline<T: MediaTool> {
    config: PipelineConfig,
    tool: T,
    shutdown_signal: Arc<AtomicBool>,
}

impl<T: MediaTool> VideoPipeline<T> {
    pub const fn new(config: PipelineConfig, tool: T, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            tool,
            shutdown_signal,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub const fn tool(&self) -> &T {
        &self.tool
    }

    /// 批次開始前的前置檢查，失敗時不應處理任何影片
    pub fn preflight(&self, input: &Path) -> Result<()> {
        self.tool.check_toolchain()?;
        validate_path_exists(input)?;
        Ok(())
    }

    /// 處理單一影片，所有錯誤在此轉為 `ProcessingResult::Error`
    pub fn process_video(
        &self,
        file: &Path,
        output_dir: &Path,
        base_dir: &str,
        options: EncodeOptions,
    ) -> ProcessingResult {
        let started = Instant::now();

        match self.run_stages(file, output_dir, base_dir, options) {
            Ok(ProcessingResult::Success { manifest }) => {
                info!(
                    "完成 {}，耗時 {:.1}s",
                    manifest.id,
                    started.elapsed().as_secs_f64()
                );
                log_savings(&manifest);
                ProcessingResult::Success { manifest }
            }
            Ok(result) => result,
            Err(e) => {
                error!("處理失敗 {}: {e}", file.display());
                ProcessingResult::Error {
                    file: file.to_path_buf(),
                }
            }
        }
    }

    fn run_stages(
        &self,
        file: &Path,
        output_dir: &Path,
        base_dir: &str,
        options: EncodeOptions,
    ) -> Result<ProcessingResult> {
        // Resolve
        let source = resolve_source(file, &self.config)?;
        let id = video_id(&source)?;
        ensure_directory_exists(output_dir)?;

        // Hash
        let digest = hash_file(&source)?;
        debug!("{id} hash={}", digest.digest);

        // CacheCheck
        if let Some(existing) = load_manifest(output_dir, &id)
            && existing.hash == digest.digest
        {
            info!("{id} 未變更，沿用既有 manifest");
            return Ok(ProcessingResult::Unchanged { manifest: existing });
        }

        info!("處理 {}", source.display());
        let names = ArtifactNames::new(&id, &digest.short_digest);

        // Transcode
        let renditions = RenditionTranscoder::new(
            &self.tool,
            &self.config.renditions,
            self.config.max_height,
        )
        .transcode(&source, output_dir, &names.renditions, options)?;

        // Poster
        let poster = PosterSynthesizer::new(&self.tool, self.config.poster.format)
            .make_poster(&source, output_dir, &names.poster, options)?;

        // Thumbnails
        let strip_settings = &self.config.thumbnail_strip;
        let strip = ThumbnailStripSynthesizer::new(&self.tool, strip_settings).make_strip(
            &source,
            output_dir,
            &names.strip,
            strip_settings.row_height,
            strip_settings.interval_count,
            options,
        )?;

        // Probe
        let metadata = self.tool.probe(&source)?;

        // Assemble
        let manifest = Manifest {
            id: id.clone(),
            hash: digest.digest,
            sources: renditions
                .into_iter()
                .map(|rendition| Rendition {
                    path: public_path(base_dir, &rendition.path),
                    ..rendition
                })
                .collect(),
            poster: public_path(base_dir, &poster),
            thumbnails: ThumbnailStrip {
                path: public_path(base_dir, &strip.path),
                ..strip
            },
            width: metadata.width,
            height: metadata.height,
            duration: metadata.duration,
            size: metadata.size,
            fps: metadata.fps,
        };

        // Persist
        let manifest = save_manifest(&manifest_path(output_dir, &id), manifest)?;
        Ok(ProcessingResult::Success { manifest })
    }

    /// 依序處理多支影片，單一失敗不影響其他影片
    ///
    /// 收到中斷信號後不再開始新的影片，回傳目前為止的結果。
    pub fn process_many(
        &self,
        files: &[impl AsRef<Path>],
        output_dir: &Path,
        base_dir: &str,
        log_level: FfmpegLogLevel,
    ) -> BatchResult {
        let options = EncodeOptions {
            log_level,
            overwrite: true,
        };
        let mut results = Vec::with_capacity(files.len());

        for (index, file) in files.iter().enumerate() {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷信號，略過剩餘 {} 支影片", files.len() - index);
                break;
            }
            results.push(self.process_video(file.as_ref(), output_dir, base_dir, options));
        }

        let batch = collect_results(results);
        info!(
            "批次完成 - 成功: {}, 未變更: {}, 失敗: {}",
            batch.success.len(),
            batch.unchanged.len(),
            batch.errors.len()
        );
        batch
    }
}

fn log_savings(manifest: &Manifest) {
    for saving in rendition_savings(manifest) {
        info!(
            "  {} {}（{:+.1}%）",
            saving.mime_type,
            format_bytes(saving.byte_size),
            -saving.reduction_percent
        );
    }
}
