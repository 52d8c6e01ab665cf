//! Video and audio staging transcodes.
//!
//! Three fixed-purpose ffmpeg invocations back the staging pipeline: a
//! capped-bitrate H.264+AAC MP4 compression, a single-frame thumbnail grab
//! at a fixed timestamp, and an MP3 audio compression. Success is defined
//! purely by output-file presence; argument templates are constants, built
//! as vectors and never interpolated through a shell.

mod config;
mod error;
mod ffmpeg;
mod traits;

pub use config::TranscoderConfig;
pub use error::TranscodeError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
