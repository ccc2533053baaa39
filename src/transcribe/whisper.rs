use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::process::Command;

use super::Transcriber;
use crate::{Result, ScribeError};

/// Transcription through the OpenAI Whisper command line tool
pub struct WhisperTranscriber {
    whisper_path: String,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(whisper_path: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            whisper_path: whisper_path.into(),
            model: model.into(),
        }
    }

    /// Path whisper writes its text output to for a given input
    fn text_output_path(audio: &Path, output_dir: &Path) -> PathBuf {
        let stem = audio
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "transcript".to_string());
        output_dir.join(format!("{}.txt", stem))
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &Path) -> Result<String> {
        let work_dir = TempDir::new()
            .context("Failed to create temporary directory for whisper output")?;

        tracing::info!("Transcribing {} with whisper model {}", audio.display(), self.model);

        let output = Command::new(&self.whisper_path)
            .arg(audio)
            .arg("--model").arg(&self.model)
            .arg("--output_dir").arg(work_dir.path())
            .arg("--output_format").arg("txt")
            .arg("--verbose").arg("False")
            .output()
            .await
            .map_err(|e| ScribeError::TranscriptionFailed(format!("could not run {}: {}", self.whisper_path, e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ScribeError::TranscriptionFailed(format!(
                "{}: {}",
                audio.display(),
                error.trim()
            ))
            .into());
        }

        let text_path = Self::text_output_path(audio, work_dir.path());
        let text = fs_err::tokio::read_to_string(&text_path)
            .await
            .map_err(|e| ScribeError::TranscriptionFailed(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(ScribeError::TranscriptionFailed(format!(
                "{}: no speech recognised",
                audio.display()
            ))
            .into());
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_output_path_uses_audio_stem() {
        let path = WhisperTranscriber::text_output_path(
            Path::new("out/audios/My Talk.mp3"),
            Path::new("/tmp/work"),
        );
        assert_eq!(path, PathBuf::from("/tmp/work/My Talk.txt"));
    }

    #[tokio::test]
    async fn test_missing_binary_is_transcription_failure() {
        let transcriber = WhisperTranscriber::new("/nonexistent/whisper-binary", "base");
        let err = transcriber
            .transcribe(Path::new("missing.mp3"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScribeError>(),
            Some(ScribeError::TranscriptionFailed(_))
        ));
    }
}
