//! Per-video processing: download, audio extraction, transcription.
//!
//! [`ItemProcessor::process`] drives the three collaborators for one video and
//! always returns an [`ItemOutcome`]. Failures are logged and reported through the
//! outcome, never propagated, so one bad video cannot disturb its siblings.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub mod batch;
pub mod cooldown;
pub mod progress;

use crate::config::Config;
use crate::extractors::ffmpeg::FfmpegTranscoder;
use crate::extractors::youtube::YtDlp;
use crate::extractors::{is_video_file, Transcoder, VideoDownloader};
use crate::output::{self, OutputLayout};
use crate::transcribe::{Transcriber, WhisperTranscriber};

/// Step of the per-video pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Prepare,
    Download,
    Transcode,
    Transcribe,
    WriteTranscript,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStage::Prepare => write!(f, "prepare"),
            ProcessingStage::Download => write!(f, "download"),
            ProcessingStage::Transcode => write!(f, "transcode"),
            ProcessingStage::Transcribe => write!(f, "transcribe"),
            ProcessingStage::WriteTranscript => write!(f, "write transcript"),
        }
    }
}

/// Result of processing one video
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Completed { transcript: PathBuf },
    Failed { stage: ProcessingStage, reason: String },
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Completed { .. })
    }

    fn failed(stage: ProcessingStage, err: anyhow::Error) -> Self {
        ItemOutcome::Failed {
            stage,
            reason: format!("{:#}", err),
        }
    }
}

/// Runs one video through download, transcode and transcription
pub struct ItemProcessor {
    layout: OutputLayout,
    downloader: Arc<dyn VideoDownloader>,
    transcoder: Arc<dyn Transcoder>,
    transcriber: Arc<dyn Transcriber>,
}

impl ItemProcessor {
    pub fn new(
        layout: OutputLayout,
        downloader: Arc<dyn VideoDownloader>,
        transcoder: Arc<dyn Transcoder>,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            layout,
            downloader,
            transcoder,
            transcriber,
        }
    }

    /// Build a processor backed by yt-dlp, ffmpeg and whisper
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            OutputLayout::new(&config.output_root),
            Arc::new(YtDlp::new(&config.tools.yt_dlp)),
            Arc::new(FfmpegTranscoder::new(&config.tools.ffmpeg)),
            Arc::new(WhisperTranscriber::new(
                &config.tools.whisper,
                &config.tools.whisper_model,
            )),
        )
    }

    /// Process one video, reporting rather than propagating any failure
    pub async fn process(&self, item: &str) -> ItemOutcome {
        let outcome = self.run_steps(item).await;

        match &outcome {
            ItemOutcome::Completed { transcript } => {
                info!("Processed: {} -> {}", item, transcript.display());
            }
            ItemOutcome::Failed { stage, reason } => {
                warn!("Failed to process {} at {} stage: {}", item, stage, reason);
            }
        }

        outcome
    }

    async fn run_steps(&self, item: &str) -> ItemOutcome {
        if let Err(e) = self.layout.ensure().await {
            return ItemOutcome::failed(ProcessingStage::Prepare, e);
        }

        let video = match self.downloader.download(item, &self.layout.downloads()).await {
            Ok(path) => path,
            Err(e) => return ItemOutcome::failed(ProcessingStage::Download, e),
        };
        info!("Downloaded: {}", video.display());

        if !is_video_file(&video) {
            debug!("{} is not a common video container", video.display());
        }

        // From here on the video stays on disk if anything fails, for manual retry
        let audio_target = self.layout.audio_path_for(&video);
        let audio = match self.transcoder.transcode(&video, &audio_target).await {
            Ok(path) => path,
            Err(e) => return ItemOutcome::failed(ProcessingStage::Transcode, e),
        };

        let text = match self.transcriber.transcribe(&audio).await {
            Ok(text) => text,
            Err(e) => return ItemOutcome::failed(ProcessingStage::Transcribe, e),
        };

        let transcript = self.layout.transcript_path_for(&video);
        if let Err(e) = output::write_transcript(&transcript, &text).await {
            return ItemOutcome::failed(ProcessingStage::WriteTranscript, e);
        }

        if let Err(e) = fs_err::tokio::remove_file(&video).await {
            warn!("Transcript written but could not remove {}: {}", video.display(), e);
        }

        ItemOutcome::Completed { transcript }
    }
}
