use async_trait::async_trait;
use std::path::{Path, PathBuf};
use url::Url;

pub mod ffmpeg;
pub mod youtube;

use crate::Result;

/// Container extensions recognised as video downloads
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "flv", "wmv"];

/// Resolves a channel into the videos it contains
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelLister: Send + Sync {
    /// List item references in channel order; an empty channel yields an empty list
    async fn list_items(&self, channel: &str) -> Result<Vec<String>>;
}

/// Downloads a single video into a directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoDownloader: Send + Sync {
    /// Download `item` into `dest_dir`, returning the path of the file produced
    async fn download(&self, item: &str, dest_dir: &Path) -> Result<PathBuf>;
}

/// Extracts the audio track of a local video file
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Write the audio of `video` to `audio`, replacing any existing file
    async fn transcode(&self, video: &Path, audio: &Path) -> Result<PathBuf>;
}

/// Check whether a path carries one of the known video container extensions
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Validate and normalize URLs
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url)
        .map_err(|_| anyhow::anyhow!("Invalid URL format: {}", url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("URL must use HTTP or HTTPS protocol");
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        assert!(is_video_file(Path::new("downloads/talk.mp4")));
        assert!(is_video_file(Path::new("downloads/Talk.MKV")));
        assert!(!is_video_file(Path::new("downloads/talk.webm")));
        assert!(!is_video_file(Path::new("downloads/talk.m4a")));
        assert!(!is_video_file(Path::new("downloads/talk")));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://www.youtube.com/@example/videos").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("not a url").is_err());
    }
}
