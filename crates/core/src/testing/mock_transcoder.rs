//! Mock transcoder for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::transcoder::{Transcoder, TranscodeError};

/// Mock implementation of the [`Transcoder`] trait.
///
/// Each operation writes a small stub file to the requested output path.
/// Individual operations can be made to fail to exercise the fatal
/// (compress) and best-effort (frame grab) paths separately.
#[derive(Debug, Default)]
pub struct MockTranscoder {
    fail_video: AtomicBool,
    fail_frame: AtomicBool,
    fail_audio: AtomicBool,
    videos: AtomicUsize,
    frames: AtomicUsize,
    audios: AtomicUsize,
}

impl MockTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `compress_video` fail.
    pub fn fail_video(&self) {
        self.fail_video.store(true, Ordering::SeqCst);
    }

    /// Makes `extract_frame` fail.
    pub fn fail_frame(&self) {
        self.fail_frame.store(true, Ordering::SeqCst);
    }

    /// Makes `compress_audio` fail.
    pub fn fail_audio(&self) {
        self.fail_audio.store(true, Ordering::SeqCst);
    }

    pub fn video_count(&self) -> usize {
        self.videos.load(Ordering::SeqCst)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }

    pub fn audio_count(&self) -> usize {
        self.audios.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn compress_video(&self, _input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.videos.fetch_add(1, Ordering::SeqCst);
        if self.fail_video.load(Ordering::SeqCst) {
            return Err(TranscodeError::NoOutput {
                reason: "forced video failure".to_string(),
            });
        }
        tokio::fs::write(output, b"compressed video").await?;
        Ok(())
    }

    async fn extract_frame(&self, _input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.frames.fetch_add(1, Ordering::SeqCst);
        if self.fail_frame.load(Ordering::SeqCst) {
            return Err(TranscodeError::NoOutput {
                reason: "forced frame failure".to_string(),
            });
        }
        tokio::fs::write(output, b"video frame").await?;
        Ok(())
    }

    async fn compress_audio(&self, _input: &Path, output: &Path) -> Result<(), TranscodeError> {
        self.audios.fetch_add(1, Ordering::SeqCst);
        if self.fail_audio.load(Ordering::SeqCst) {
            return Err(TranscodeError::NoOutput {
                reason: "forced audio failure".to_string(),
            });
        }
        tokio::fs::write(output, b"compressed audio").await?;
        Ok(())
    }
}
