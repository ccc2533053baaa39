use anyhow::{Context, Result};
use futures_util::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::cooldown::{cooldowns_after, Cooldown};
use super::progress::{naive_estimate, ProgressSnapshot, ProgressTracker};
use super::ItemProcessor;
use crate::config::{Config, RunConfig};
use crate::extractors::youtube::YtDlp;
use crate::extractors::ChannelLister;
use crate::utils::format_duration;

/// Totals for one channel run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub batches: usize,
    /// Pauses taken, keyed by the 1-based batch index they followed
    pub cooldowns: Vec<(usize, Cooldown)>,
    pub elapsed: Duration,
}

/// Split items into contiguous batches of at most `batch_size`, preserving order
pub fn partition<T>(items: &[T], batch_size: usize) -> Vec<&[T]> {
    items.chunks(batch_size.max(1)).collect()
}

/// Runs a whole channel through the item processor batch by batch
pub struct BatchOrchestrator {
    lister: Arc<dyn ChannelLister>,
    processor: ItemProcessor,
    settings: RunConfig,
    show_progress: bool,
}

impl BatchOrchestrator {
    pub fn new(lister: Arc<dyn ChannelLister>, processor: ItemProcessor, settings: RunConfig) -> Self {
        Self {
            lister,
            processor,
            settings,
            show_progress: false,
        }
    }

    /// Build an orchestrator backed by yt-dlp, ffmpeg and whisper
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(YtDlp::new(&config.tools.yt_dlp)),
            ItemProcessor::from_config(config),
            config.run.clone(),
        )
    }

    /// Mirror progress on a terminal progress bar
    pub fn with_progress_bar(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Resolve the channel and process every video in it.
    ///
    /// Only a channel resolution failure is returned as an error; per-video
    /// failures are counted in the summary.
    pub async fn run(&self, channel: &str) -> Result<RunSummary> {
        let items = self
            .lister
            .list_items(channel)
            .await
            .with_context(|| format!("Failed to resolve channel {}", channel))?;

        let total = items.len();
        info!("Found {} videos in the channel", total);
        info!(
            "Estimated total processing time: {}",
            format_duration(naive_estimate(total, self.settings.average_seconds_per_item))
        );

        let batches = partition(&items, self.settings.batch_size);
        let mut tracker = ProgressTracker::new(total);
        let progress_bar = self.progress_bar(total);
        let mut summary = RunSummary {
            total,
            batches: batches.len(),
            ..Default::default()
        };

        for (position, batch) in batches.iter().enumerate() {
            let index = position + 1;
            info!("Processing batch {}/{} ({} videos)", index, batches.len(), batch.len());

            // The whole batch drains before the next one starts
            let mut completions = stream::iter(batch.iter())
                .map(|item| self.processor.process(item))
                .buffer_unordered(self.settings.max_concurrency.max(1));

            while let Some(outcome) = completions.next().await {
                if outcome.is_success() {
                    summary.succeeded += 1;
                } else {
                    summary.failed += 1;
                }

                let snapshot = tracker.record_completion();
                report_progress(&snapshot, &progress_bar);
            }

            for pause in cooldowns_after(index, &self.settings.cooldown) {
                match pause {
                    Cooldown::Short(d) => info!("Taking a {} break for cooling...", format_duration(d)),
                    Cooldown::Long(d) => info!("Taking a {} break for extended cooling...", format_duration(d)),
                }
                progress_bar.set_message("cooling down");
                tokio::time::sleep(pause.duration()).await;
                summary.cooldowns.push((index, pause));
            }
        }

        progress_bar.finish_and_clear();
        summary.elapsed = tracker.elapsed();

        info!(
            "All videos processed ({} succeeded, {} failed). Total time taken: {}",
            summary.succeeded,
            summary.failed,
            format_duration(summary.elapsed)
        );

        Ok(summary)
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        ) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar
    }
}

fn report_progress(snapshot: &ProgressSnapshot, progress_bar: &ProgressBar) {
    info!("Progress: {}/{} videos processed", snapshot.completed, snapshot.total);
    info!("{}", rate_line(snapshot));
    progress_bar.set_position(snapshot.completed as u64);

    match snapshot.remaining() {
        Some(remaining) => {
            let finish = chrono::Duration::from_std(remaining)
                .ok()
                .and_then(|d| chrono::Local::now().checked_add_signed(d));
            match finish {
                Some(at) => info!(
                    "Estimated time remaining: {} (done around {})",
                    format_duration(remaining),
                    at.format("%Y-%m-%d %H:%M")
                ),
                None => info!("Estimated time remaining: {}", format_duration(remaining)),
            }
            progress_bar.set_message(format!("eta {}", format_duration(remaining)));
        }
        None => info!("Estimated time remaining: unknown"),
    }
}

/// Elapsed time and throughput for a progress line
fn rate_line(snapshot: &ProgressSnapshot) -> String {
    let throughput = match snapshot.throughput() {
        Some(rate) => format!("{:.4} videos/s", rate),
        None => "unknown".to_string(),
    };
    format!(
        "Elapsed: {}, throughput: {}",
        format_duration(snapshot.elapsed),
        throughput
    )
}
