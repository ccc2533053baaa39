use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::{ChannelLister, VideoDownloader};
use crate::{Result, ScribeError};

/// Channel listing and video download through yt-dlp
pub struct YtDlp {
    yt_dlp_path: String,
}

impl YtDlp {
    pub fn new(yt_dlp_path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: yt_dlp_path.into(),
        }
    }

    /// Dump the flat playlist JSON for a channel
    async fn get_channel_info(&self, channel: &str) -> Result<Value> {
        tracing::debug!("Resolving channel: {}", channel);

        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--flat-playlist",
                "--dump-single-json",
                "--no-warnings",
                channel,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ScribeError::ChannelResolution(format!("could not run {}: {}", self.yt_dlp_path, e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ScribeError::ChannelResolution(error.trim().to_string()).into());
        }

        let info: Value = serde_json::from_slice(&output.stdout)
            .map_err(|e| ScribeError::ChannelResolution(format!("malformed yt-dlp output: {}", e)))?;

        Ok(info)
    }
}

#[async_trait]
impl ChannelLister for YtDlp {
    async fn list_items(&self, channel: &str) -> Result<Vec<String>> {
        let info = self.get_channel_info(channel).await?;
        Ok(parse_channel_entries(&info))
    }
}

#[async_trait]
impl VideoDownloader for YtDlp {
    async fn download(&self, item: &str, dest_dir: &Path) -> Result<PathBuf> {
        tracing::debug!("Downloading {} into {}", item, dest_dir.display());

        let template = dest_dir.join("%(title)s.%(ext)s").to_string_lossy().into_owned();
        let output = Command::new(&self.yt_dlp_path)
            .args([
                "--format", "bestaudio/best",
                "--output", template.as_str(),
                "--no-playlist",
                "--quiet",
                "--no-warnings",
                // Report the final path once post-processing has moved the file
                "--print", "after_move:filepath",
                item,
            ])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ScribeError::DownloadFailed(format!("could not run {}: {}", self.yt_dlp_path, e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ScribeError::DownloadFailed(format!("{}: {}", item, error.trim())).into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_downloaded_path(&stdout)
            .ok_or_else(|| ScribeError::DownloadFailed(format!("{}: yt-dlp produced no file", item)).into())
    }
}

/// Collect item references from a flat playlist dump, descending into channel tabs
pub fn parse_channel_entries(info: &Value) -> Vec<String> {
    let mut items = Vec::new();
    collect_entries(info, &mut items);
    items
}

fn collect_entries(info: &Value, items: &mut Vec<String>) {
    let Some(entries) = info["entries"].as_array() else {
        return;
    };

    for entry in entries {
        if entry["entries"].is_array() {
            collect_entries(entry, items);
            continue;
        }

        let reference = entry["url"]
            .as_str()
            .or_else(|| entry["webpage_url"].as_str())
            .map(str::to_string)
            .or_else(|| {
                entry["id"]
                    .as_str()
                    .map(|id| format!("https://www.youtube.com/watch?v={}", id))
            });

        match reference {
            Some(reference) => items.push(reference),
            None => tracing::debug!("Skipping channel entry without a locator"),
        }
    }
}

/// Take the last non-empty line yt-dlp printed as the downloaded file
pub fn parse_downloaded_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}
