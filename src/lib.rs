//! Channel Scribe - batch transcription of a video channel
//!
//! This library resolves a channel into its videos, downloads each one with yt-dlp,
//! extracts the audio with ffmpeg and transcribes it with Whisper. Videos are processed
//! in fixed-size batches with bounded concurrency, and scheduled cooldowns between
//! batches keep the request rate low enough to avoid upstream blocking.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod pipeline;
pub mod transcribe;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use extractors::{ChannelLister, Transcoder, VideoDownloader};
pub use output::OutputLayout;
pub use pipeline::batch::{BatchOrchestrator, RunSummary};
pub use pipeline::{ItemOutcome, ItemProcessor, ProcessingStage};
pub use transcribe::Transcriber;

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to channel processing
#[derive(thiserror::Error, Debug)]
pub enum ScribeError {
    #[error("Channel resolution failed: {0}")]
    ChannelResolution(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Audio extraction failed: {0}")]
    TranscodeFailed(String),

    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
