pub mod component;
pub mod config;
pub mod error;
pub mod init;
pub mod manifest;
pub mod signal;
pub mod tools;

pub use component::video_pipeline::{BatchResult, ProcessingResult, VideoPipeline};
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use manifest::Manifest;
