//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscodeError;
use super::traits::Transcoder;

/// Constant-rate-factor cap for video compression.
const VIDEO_CRF: &str = "23";
/// Video bitrate ceiling.
const VIDEO_MAXRATE: &str = "4000k";
/// Rate-control buffer matching the maxrate cap.
const VIDEO_BUFSIZE: &str = "8000k";
/// Width cap; height follows the aspect ratio, kept even for yuv420p.
const VIDEO_SCALE: &str = "scale='min(1280,iw)':-2";
/// Audio bitrate for compressed outputs.
const AUDIO_BITRATE: &str = "128k";
/// Timestamp the thumbnail frame is grabbed at.
const FRAME_TIMESTAMP: &str = "00:00:01";

/// Staging transcoder shelling out to ffmpeg with fixed argument templates.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    fn build_video_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "libx264".to_string(),
            "-crf".to_string(),
            VIDEO_CRF.to_string(),
            "-maxrate".to_string(),
            VIDEO_MAXRATE.to_string(),
            "-bufsize".to_string(),
            VIDEO_BUFSIZE.to_string(),
            "-vf".to_string(),
            VIDEO_SCALE.to_string(),
            "-pix_fmt".to_string(),
            "yuv420p".to_string(),
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            AUDIO_BITRATE.to_string(),
            "-movflags".to_string(),
            "+faststart".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            output.to_string_lossy().to_string(),
        ]
    }

    fn build_frame_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-ss".to_string(),
            FRAME_TIMESTAMP.to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            output.to_string_lossy().to_string(),
        ]
    }

    fn build_audio_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-c:a".to_string(),
            "libmp3lame".to_string(),
            "-b:a".to_string(),
            AUDIO_BITRATE.to_string(),
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Runs one ffmpeg invocation; success is output-file presence.
    async fn run(&self, args: Vec<String>, output: &Path) -> Result<(), TranscodeError> {
        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // A cancelled run must not leave ffmpeg running.
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscodeError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    TranscodeError::Io(e)
                }
            })?;

        let deadline = Duration::from_secs(self.config.timeout_secs);
        let status = match timeout(deadline, child.wait()).await {
            Ok(status) => status?,
            Err(_) => {
                let _ = child.kill().await;
                return Err(TranscodeError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        if !status.success() {
            return Err(TranscodeError::no_output(format!(
                "ffmpeg exited with code {:?}",
                status.code()
            )));
        }
        if !output.exists() {
            return Err(TranscodeError::no_output("output file missing"));
        }
        Ok(())
    }

    fn check_input(input: &Path) -> Result<(), TranscodeError> {
        if !input.exists() {
            return Err(TranscodeError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn compress_video(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        Self::check_input(input)?;
        debug!(input = %input.display(), "compressing video");
        self.run(self.build_video_args(input, output), output).await
    }

    async fn extract_frame(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        Self::check_input(input)?;
        debug!(input = %input.display(), "extracting thumbnail frame");
        self.run(self.build_frame_args(input, output), output).await
    }

    async fn compress_audio(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        Self::check_input(input)?;
        debug!(input = %input.display(), "compressing audio");
        self.run(self.build_audio_args(input, output), output).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_video_args_caps() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let args = transcoder.build_video_args(Path::new("/in.mov"), Path::new("/out.mp4"));

        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&VIDEO_CRF.to_string()));
        assert!(args.contains(&VIDEO_MAXRATE.to_string()));
        assert!(args.contains(&VIDEO_SCALE.to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert_eq!(args.last().unwrap(), "/out.mp4");
    }

    #[test]
    fn test_build_frame_args_fixed_timestamp() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let args = transcoder.build_frame_args(Path::new("/in.mp4"), Path::new("/frame.jpg"));

        let ss = args.iter().position(|a| a == "-ss").unwrap();
        assert_eq!(args[ss + 1], FRAME_TIMESTAMP);
        assert!(args.contains(&"-frames:v".to_string()));
    }

    #[test]
    fn test_build_audio_args_drops_video_stream() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let args = transcoder.build_audio_args(Path::new("/in.flac"), Path::new("/out.mp3"));

        assert!(args.contains(&"-vn".to_string()));
        assert!(args.contains(&"libmp3lame".to_string()));
        assert!(args.contains(&AUDIO_BITRATE.to_string()));
    }

    #[tokio::test]
    async fn test_missing_input_is_reported() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let result = transcoder
            .compress_video(Path::new("/nonexistent/in.mov"), Path::new("/out.mp4"))
            .await;
        assert!(matches!(result, Err(TranscodeError::InputNotFound { .. })));
    }
}
