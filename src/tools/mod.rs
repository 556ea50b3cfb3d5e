mod ffmpeg_command;
mod ffprobe_info;
mod file_hasher;
mod media_tool;
mod path_validator;
mod scratch_dir;
mod video_scanner;

pub use ffmpeg_command::{EncodeOptions, FfmpegCommand};
pub use ffprobe_info::{VideoMetadata, parse_probe_output, probe_video};
pub use file_hasher::{ContentDigest, SHORT_DIGEST_LEN, hash_file};
pub use media_tool::{
    FfmpegTool, FrameSelector, MediaTool, RenditionTarget, frame_command, transcode_command,
};
pub use path_validator::{ensure_directory_exists, validate_path_exists};
pub use scratch_dir::ScratchDir;
pub use video_scanner::scan_source_files;
