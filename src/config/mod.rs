pub mod load;
pub mod types;

pub use load::DEFAULT_CONFIG_FILE;
pub use types::{
    FfmpegLogLevel, PipelineConfig, PosterFormat, PosterSettings, RenditionProfile, StripFormat,
    StripSettings,
};
