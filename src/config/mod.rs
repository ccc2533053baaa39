use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::RunOverrides;
use crate::ScribeError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory for downloads, audio and transcripts
    pub output_root: PathBuf,

    /// Batch run settings
    pub run: RunConfig,

    /// External tool settings
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Videos per batch
    pub batch_size: usize,

    /// Maximum videos processed concurrently within one batch
    pub max_concurrency: usize,

    /// Rough per-video cost used for the up-front estimate
    pub average_seconds_per_item: u64,

    /// Pauses inserted between batches
    pub cooldown: CooldownConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Apply the short pause after every N-th batch
    pub short_every: usize,

    /// Short pause length in seconds
    pub short_secs: u64,

    /// Apply the long pause after every N-th batch
    pub long_every: usize,

    /// Long pause length in seconds
    pub long_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// yt-dlp executable
    pub yt_dlp: String,

    /// ffmpeg executable
    pub ffmpeg: String,

    /// whisper executable
    pub whisper: String,

    /// Whisper model size
    pub whisper_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("output"),
            run: RunConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_concurrency: 4,
            average_seconds_per_item: 300,
            cooldown: CooldownConfig::default(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            short_every: 2,
            short_secs: 300,
            long_every: 6,
            long_secs: 1800,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            yt_dlp: "yt-dlp".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            whisper: "whisper".to_string(),
            whisper_model: "base".to_string(),
        }
    }
}

impl CooldownConfig {
    pub fn short_duration(&self) -> Duration {
        Duration::from_secs(self.short_secs)
    }

    pub fn long_duration(&self) -> Duration {
        Duration::from_secs(self.long_secs)
    }
}

impl Config {
    /// Load configuration from an explicit path, the default locations, or built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate configuration from a YAML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs_err::create_dir_all(parent)?;
            }
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("channel-scribe").join("config.yaml"))
    }

    /// Apply command line overrides on top of file values
    pub fn apply_overrides(&mut self, overrides: &RunOverrides) -> Result<()> {
        if let Some(output) = &overrides.output {
            self.output_root = output.clone();
        }
        if let Some(batch_size) = overrides.batch_size {
            self.run.batch_size = batch_size;
        }
        if let Some(max_concurrency) = overrides.max_concurrency {
            self.run.max_concurrency = max_concurrency;
        }
        if let Some(secs) = overrides.short_cooldown {
            self.run.cooldown.short_secs = secs;
        }
        if let Some(secs) = overrides.long_cooldown {
            self.run.cooldown.long_secs = secs;
        }
        if let Some(model) = &overrides.model {
            self.tools.whisper_model = model.clone();
        }

        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.run.batch_size == 0 {
            return Err(ScribeError::InvalidConfig("batch size must be at least 1".into()).into());
        }
        if self.run.max_concurrency == 0 {
            return Err(ScribeError::InvalidConfig("max concurrency must be at least 1".into()).into());
        }
        if self.run.cooldown.short_every == 0 || self.run.cooldown.long_every == 0 {
            return Err(ScribeError::InvalidConfig("cooldown periods must be at least 1 batch".into()).into());
        }
        if self.tools.whisper_model.trim().is_empty() {
            return Err(ScribeError::InvalidConfig("whisper model must not be empty".into()).into());
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Output Root: {}", self.output_root.display());
        println!("  Batch Size: {}", self.run.batch_size);
        println!("  Max Concurrency: {}", self.run.max_concurrency);
        println!("  Avg Seconds/Video: {}", self.run.average_seconds_per_item);
        println!(
            "  Short Cooldown: {}s every {} batches",
            self.run.cooldown.short_secs, self.run.cooldown.short_every
        );
        println!(
            "  Long Cooldown: {}s every {} batches",
            self.run.cooldown.long_secs, self.run.cooldown.long_every
        );
        println!("  yt-dlp: {}", self.tools.yt_dlp);
        println!("  ffmpeg: {}", self.tools.ffmpeg);
        println!("  whisper: {} (model: {})", self.tools.whisper, self.tools.whisper_model);
    }
}
