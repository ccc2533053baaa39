use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use super::Transcoder;
use crate::{Result, ScribeError};

/// Audio extraction through ffmpeg
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
}

impl FfmpegTranscoder {
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn transcode(&self, video: &Path, audio: &Path) -> Result<PathBuf> {
        tracing::debug!("Converting {} to {}", video.display(), audio.display());

        let source = video.to_string_lossy().into_owned();
        let target = audio.to_string_lossy().into_owned();

        let output = Command::new(&self.ffmpeg_path)
            .args([
                "-hide_banner",
                "-loglevel", "error",
                "-y", // Overwrite output file
                "-i", source.as_str(),
                "-vn", // No video
                "-acodec", "libmp3lame",
                target.as_str(),
            ])
            .output()
            .await
            .map_err(|e| ScribeError::TranscodeFailed(format!("could not run {}: {}", self.ffmpeg_path, e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ScribeError::TranscodeFailed(format!(
                "{}: {}",
                video.display(),
                error.trim()
            ))
            .into());
        }

        Ok(audio.to_path_buf())
    }
}
