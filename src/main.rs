use anyhow::{Context, Result};
use auto_video_optimize::component::video_pipeline::{
    BatchResult, VideoPipeline, format_bytes, total_bytes_saved,
};
use auto_video_optimize::config::{FfmpegLogLevel, PipelineConfig};
use auto_video_optimize::init;
use auto_video_optimize::signal::setup_shutdown_signal;
use auto_video_optimize::tools::{FfmpegTool, ensure_directory_exists, scan_source_files};
use clap::Parser;
use console::style;
use dialoguer::Input;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "將影片轉為網頁用的多個版本，並產生封面、縮圖條與 manifest"
)]
struct Cli {
    /// 來源影片或資料夾（未指定時互動輸入）
    #[arg(short, long, value_name = "SRC")]
    src: Option<PathBuf>,

    /// 輸出資料夾（未指定時互動輸入）
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    /// manifest 中公開路徑的前綴
    #[arg(short, long, default_value = "/")]
    base_dir: String,

    /// 設定檔路徑（預設為工作目錄下的 pipeline.json）
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 縮圖條每格高度
    #[arg(long)]
    row_height: Option<u32>,

    /// 縮圖條取樣數量
    #[arg(long)]
    intervals: Option<u32>,

    /// ffmpeg log level（quiet, error, warning, info, verbose）
    #[arg(long)]
    log_level: Option<FfmpegLogLevel>,
}

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();
    let shutdown_signal = setup_shutdown_signal().context("無法設定 Ctrl-C 處理器")?;

    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    if let Some(row_height) = cli.row_height {
        config.thumbnail_strip.row_height = row_height;
    }
    if let Some(intervals) = cli.intervals {
        config.thumbnail_strip.interval_count = intervals;
    }
    if let Some(log_level) = cli.log_level {
        config.ffmpeg_log_level = log_level;
    }
    config.validate()?;

    println!("{}", style("=== 影片最佳化 ===").cyan().bold());

    let src = match cli.src {
        Some(src) => src,
        None => prompt_path("請輸入來源影片或資料夾路徑")?,
    };
    let output_dir = match cli.output {
        Some(output) => output,
        None => prompt_path("請輸入輸出資料夾路徑")?,
    };

    let log_level = config.ffmpeg_log_level;
    let pipeline = VideoPipeline::new(config, FfmpegTool, shutdown_signal);
    pipeline.preflight(&src)?;

    let files = scan_source_files(&src, pipeline.config())?;
    if files.is_empty() {
        println!("{}", style("找不到任何來源影片").yellow());
        return Ok(());
    }
    println!(
        "{}",
        style(format!("找到 {} 個來源影片", files.len())).green()
    );

    ensure_directory_exists(&output_dir)?;
    let batch = pipeline.process_many(files.as_slice(), &output_dir, &cli.base_dir, log_level);
    print_summary(&batch);
    info!("程式正常結束");

    Ok(())
}

fn prompt_path(prompt: &str) -> Result<PathBuf> {
    let path: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(PathBuf::from(path.trim()))
}

fn print_summary(batch: &BatchResult) {
    println!("\n{}", style("=== 處理結果 ===").cyan().bold());

    for manifest in &batch.success {
        println!("  {} {}", style("✓").green(), manifest.id);
    }
    println!(
        "成功: {}  未變更: {}  失敗: {}",
        style(batch.success.len()).green(),
        style(batch.unchanged.len()).dim(),
        style(batch.errors.len()).red()
    );

    for file in &batch.errors {
        println!("  {} {}", style("✗").red(), file.display());
    }

    if !batch.success.is_empty() {
        println!(
            "{}",
            style(format!(
                "節省 {} 的傳輸量",
                format_bytes(total_bytes_saved(&batch.success))
            ))
            .green()
            .bold()
        );
    }
}
