pub mod renditions;
pub mod thumbnail_strip;
pub mod video_pipeline;
