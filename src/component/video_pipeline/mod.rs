//! 影片處理流程元件
//!
//! 以來源內容雜湊決定是否重新處理：
//! 雜湊與既有 manifest 相同時直接沿用，否則重新產生
//! 所有輸出版本、封面、縮圖條並寫入新的 manifest。

mod main;
mod paths;
mod report;
mod result;

pub use main::VideoPipeline;
pub use paths::{ArtifactNames, public_path, resolve_source, video_id};
pub use report::{
    RenditionSavings, bytes_saved, format_bytes, rendition_savings, total_bytes_saved,
};
pub use result::{BatchResult, ProcessingResult, collect_results};
