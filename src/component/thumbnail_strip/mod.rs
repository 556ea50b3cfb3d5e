//! 縮圖條生成元件
//!
//! 在片長內均勻取樣，擷取畫格後縮放到固定高度，
//! 由左至右合併為單張圖片。

mod frame_extractor;
mod main;
mod strip_compositor;
mod timestamp_sampler;

pub use frame_extractor::{FrameTask, create_frame_tasks, extract_frames};
pub use main::ThumbnailStripSynthesizer;
pub use strip_compositor::{compose_strip, frame_width, resize_frames, strip_size, write_strip};
pub use timestamp_sampler::{SAMPLE_EPSILON, sample_timestamps};
