//! 每支影片的 manifest 紀錄與讀寫

mod store;
mod types;

pub use store::{load_manifest, manifest_path, save_manifest};
pub use types::{Manifest, Rendition, ThumbnailStrip};
