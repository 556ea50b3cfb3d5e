use crate::config::FfmpegLogLevel;
use crate::error::Result;
use crate::tools::{EncodeOptions, FrameSelector, MediaTool};
use log::debug;
use std::path::{Path, PathBuf};

/// 單一畫格擷取任務
#[derive(Debug, Clone)]
pub struct FrameTask {
    pub timestamp: f64,
    pub output_path: PathBuf,
    pub index: usize,
}

/// 建立擷取任務，檔名補零使目錄排序等同時間排序
#[must_use]
pub fn create_frame_tasks(timestamps: &[f64], scratch_dir: &Path) -> Vec<FrameTask> {
    timestamps
        .iter()
        .enumerate()
        .map(|(i, &timestamp)| FrameTask {
            timestamp,
            output_path: scratch_dir.join(format!("frame_{i:04}.jpg")),
            index: i,
        })
        .collect()
}

/// 依序擷取所有畫格，任一失敗即中止
///
/// 暫存目錄為本次專用，一律覆寫。
pub fn extract_frames<T: MediaTool>(
    tool: &T,
    video_path: &Path,
    tasks: &[FrameTask],
    log_level: FfmpegLogLevel,
) -> Result<Vec<PathBuf>> {
    let options = EncodeOptions {
        log_level,
        overwrite: true,
    };

    tasks
        .iter()
        .map(|task| {
            debug!(
                "擷取畫格 {}: timestamp={:.3}s",
                task.index, task.timestamp
            );
            tool.extract_frame(
                video_path,
                FrameSelector::At(task.timestamp),
                &task.output_path,
                options,
            )?;
            Ok(task.output_path.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_frame_tasks() {
        let timestamps = vec![0.0, 2.0, 4.0];
        let scratch_dir = Path::new("/test/scratch");

        let tasks = create_frame_tasks(&timestamps, scratch_dir);

        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].index, 0);
        assert!((tasks[1].timestamp - 2.0).abs() < 0.01);
        assert_eq!(
            tasks[0].output_path,
            PathBuf::from("/test/scratch/frame_0000.jpg")
        );
        assert_eq!(
            tasks[2].output_path,
            PathBuf::from("/test/scratch/frame_0002.jpg")
        );
    }

    #[test]
    fn test_file_names_sort_in_temporal_order() {
        let timestamps: Vec<f64> = (0..12).map(f64::from).collect();
        let tasks = create_frame_tasks(&timestamps, Path::new("/s"));

        let mut names: Vec<String> = tasks
            .iter()
            .map(|t| t.output_path.to_string_lossy().to_string())
            .collect();
        let expected = names.clone();
        names.sort();
        assert_eq!(names, expected);
    }
}
