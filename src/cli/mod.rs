use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "channel-scribe",
    about = "Channel Scribe - Download every video of a channel and transcribe it with Whisper",
    version,
    long_about = "Resolves a channel into its videos, then downloads, extracts audio from and transcribes them in small batches. Cooldown pauses between batches keep the request rate low enough to avoid being blocked upstream."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to ./config.yaml, then the user config directory)
    #[arg(long, global = true, value_name = "FILE", env = "CHANNEL_SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and transcribe every video of a channel
    Run {
        /// Channel URL (e.g. https://www.youtube.com/@name/videos)
        #[arg(value_name = "CHANNEL_URL")]
        channel: String,

        #[command(flatten)]
        overrides: RunOverrides,
    },

    /// Download and transcribe a single video
    Process {
        /// Video URL
        #[arg(value_name = "VIDEO_URL")]
        url: String,

        /// Output root directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Whisper model to use
        #[arg(long, value_name = "NAME")]
        model: Option<String>,
    },

    /// List the videos a channel resolves to
    List {
        /// Channel URL
        #[arg(value_name = "CHANNEL_URL")]
        channel: String,
    },

    /// Show or initialise the configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },

    /// Check that yt-dlp, ffmpeg and whisper are installed
    Check,
}

/// Command line overrides for the batch run settings
#[derive(clap::Args, Debug, Default, Clone)]
pub struct RunOverrides {
    /// Output root directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Number of videos per batch
    #[arg(short, long, value_name = "COUNT")]
    pub batch_size: Option<usize>,

    /// Maximum videos processed concurrently within a batch
    #[arg(short = 'j', long, value_name = "COUNT")]
    pub max_concurrency: Option<usize>,

    /// Short cooldown in seconds
    #[arg(long, value_name = "SECS")]
    pub short_cooldown: Option<u64>,

    /// Long cooldown in seconds
    #[arg(long, value_name = "SECS")]
    pub long_cooldown: Option<u64>,

    /// Whisper model to use
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,
}
