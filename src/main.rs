use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use channel_scribe::cli::{Cli, Commands, RunOverrides};
use channel_scribe::config::Config;
use channel_scribe::extractors::{validate_url, youtube::YtDlp, ChannelLister};
use channel_scribe::pipeline::batch::BatchOrchestrator;
use channel_scribe::pipeline::{ItemOutcome, ItemProcessor};
use channel_scribe::utils;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    // `config --init` writes the defaults, so there is nothing to load yet
    let mut config = match &cli.command {
        Commands::Config { init: true, .. } => Config::default(),
        _ => Config::load(cli.config.as_deref())?,
    };

    match cli.command {
        Commands::Run { channel, overrides } => {
            config.apply_overrides(&overrides)?;
            validate_url(&channel)?;
            warn_missing_tools(&config).await;

            let summary = BatchOrchestrator::from_config(&config)
                .with_progress_bar(!cli.quiet)
                .run(&channel)
                .await?;

            println!(
                "{} {}/{} videos transcribed into {} ({} failed, {} batches)",
                style("✓").green(),
                summary.succeeded,
                summary.total,
                config.output_root.join(channel_scribe::output::TRANSCRIPTS_DIR).display(),
                summary.failed,
                summary.batches,
            );
            println!("Total time taken: {}", utils::format_duration(summary.elapsed));
        }
        Commands::Process { url, output, model } => {
            config.apply_overrides(&RunOverrides {
                output,
                model,
                ..Default::default()
            })?;
            validate_url(&url)?;
            warn_missing_tools(&config).await;

            tracing::info!("Starting processing for URL: {}", url);
            match ItemProcessor::from_config(&config).process(&url).await {
                ItemOutcome::Completed { transcript } => {
                    println!("Transcript saved to: {}", transcript.display());
                }
                ItemOutcome::Failed { stage, reason } => {
                    anyhow::bail!("Processing failed at {} stage: {}", stage, reason);
                }
            }
        }
        Commands::List { channel } => {
            validate_url(&channel)?;
            let items = YtDlp::new(&config.tools.yt_dlp)
                .list_items(&channel)
                .await
                .with_context(|| format!("Failed to resolve channel {}", channel))?;

            for item in &items {
                println!("{}", item);
            }
            tracing::info!("{} videos found", items.len());
        }
        Commands::Config { show, init } => {
            if init {
                let path = match cli.config.clone().or_else(Config::config_path) {
                    Some(path) => path,
                    None => anyhow::bail!("Could not determine config directory"),
                };
                if path.exists() {
                    anyhow::bail!("Config file already exists: {}", path.display());
                }
                config.save_to(&path)?;
                println!("Default configuration written to: {}", path.display());
            } else if show {
                config.display();
            } else {
                println!("Edit the config file to change settings:");
                match cli.config.clone().or_else(Config::config_path) {
                    Some(path) => println!("  {}", path.display()),
                    None => println!("  (no config directory available)"),
                }
                println!("Run `channel-scribe config --init` to write the defaults.");
            }
        }
        Commands::Check => {
            let statuses = utils::check_dependencies(
                &config.tools.yt_dlp,
                &config.tools.ffmpeg,
                &config.tools.whisper,
            )
            .await;

            for status in &statuses {
                match &status.version {
                    Some(version) => println!(
                        "  {} {} ({}) - {}",
                        style("✓").green(),
                        status.name,
                        version,
                        status.purpose
                    ),
                    None => println!(
                        "  {} {} not found - required for {}",
                        style("✗").red(),
                        status.name,
                        status.purpose
                    ),
                }
            }

            if statuses.iter().any(|status| !status.is_available()) {
                anyhow::bail!("Some required tools are missing");
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "channel_scribe=debug"
    } else {
        "channel_scribe=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Missing tools are reported but not fatal; paths may resolve differently at run time
async fn warn_missing_tools(config: &Config) {
    let statuses = utils::check_dependencies(
        &config.tools.yt_dlp,
        &config.tools.ffmpeg,
        &config.tools.whisper,
    )
    .await;

    let missing: Vec<_> = statuses.iter().filter(|s| !s.is_available()).collect();
    if !missing.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for status in missing {
            eprintln!("   • {} - required for {}", status.name, status.purpose);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }
}
