use anyhow::Result;
use std::path::{Path, PathBuf};

/// Subdirectory holding raw downloads
pub const DOWNLOADS_DIR: &str = "downloads";
/// Subdirectory holding extracted audio
pub const AUDIOS_DIR: &str = "audios";
/// Subdirectory holding transcripts
pub const TRANSCRIPTS_DIR: &str = "transcripts";

/// Extension of extracted audio files
pub const AUDIO_EXTENSION: &str = "mp3";
/// Extension of transcript files
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Fixed directory layout under an output root
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn downloads(&self) -> PathBuf {
        self.root.join(DOWNLOADS_DIR)
    }

    pub fn audios(&self) -> PathBuf {
        self.root.join(AUDIOS_DIR)
    }

    pub fn transcripts(&self) -> PathBuf {
        self.root.join(TRANSCRIPTS_DIR)
    }

    /// Create all three subdirectories; existing directories are left alone
    pub async fn ensure(&self) -> Result<()> {
        for dir in [self.downloads(), self.audios(), self.transcripts()] {
            fs_err::tokio::create_dir_all(&dir).await?;
        }
        Ok(())
    }

    /// Audio path for a downloaded video: same base name, audio extension
    pub fn audio_path_for(&self, video: &Path) -> PathBuf {
        self.audios().join(format!("{}.{}", base_name(video), AUDIO_EXTENSION))
    }

    /// Transcript path for a downloaded video: same base name, text extension
    pub fn transcript_path_for(&self, video: &Path) -> PathBuf {
        self.transcripts().join(format!("{}.{}", base_name(video), TRANSCRIPT_EXTENSION))
    }
}

/// File name without its final extension
fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write transcript text verbatim, replacing any existing file
pub async fn write_transcript(path: &Path, text: &str) -> Result<()> {
    fs_err::tokio::write(path, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path().join("out"));

        layout.ensure().await.unwrap();
        layout.ensure().await.unwrap();

        assert!(layout.downloads().is_dir());
        assert!(layout.audios().is_dir());
        assert!(layout.transcripts().is_dir());

        let entries = fs_err::read_dir(layout.root()).unwrap().count();
        assert_eq!(entries, 3);
    }

    #[test]
    fn test_artifact_paths_follow_video_base_name() {
        let layout = OutputLayout::new("out");
        let video = Path::new("out/downloads/Episode 1. Intro.webm");

        assert_eq!(
            layout.audio_path_for(video),
            PathBuf::from("out/audios/Episode 1. Intro.mp3")
        );
        assert_eq!(
            layout.transcript_path_for(video),
            PathBuf::from("out/transcripts/Episode 1. Intro.txt")
        );
    }

    #[tokio::test]
    async fn test_write_transcript_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talk.txt");

        write_transcript(&path, "first").await.unwrap();
        write_transcript(&path, "zweite Fassung ✓").await.unwrap();

        assert_eq!(fs_err::read_to_string(&path).unwrap(), "zweite Fassung ✓");
    }
}
