//! 影片轉檔與封面擷取

mod poster;
mod transcoder;

pub use poster::PosterSynthesizer;
pub use transcoder::{RenditionTranscoder, rendition_file_name};
