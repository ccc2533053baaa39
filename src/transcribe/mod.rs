use async_trait::async_trait;
use std::path::Path;

pub mod whisper;

pub use whisper::WhisperTranscriber;

use crate::Result;

/// Speech-to-text over a local audio file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Recognise the speech in `audio`; blank output is reported as an error
    async fn transcribe(&self, audio: &Path) -> Result<String>;
}
