//! ClaimGuard CLI: terminal front end for the claim triage pipeline.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// ClaimGuard: disinformation triage with graceful degradation
#[derive(Parser, Debug)]
#[command(name = "claimguard", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Generative model to use
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Workspace directory
    #[arg(short, long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Skip the generative and encyclopedic services entirely
    #[arg(long, global = true)]
    offline: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Commands {
    /// Run the full pipeline on one claim and print the report
    Analyze {
        /// Claim text
        text: String,
    },
    /// Pattern-based analysis only (no network)
    Score {
        /// Claim text
        text: String,
    },
    /// List fact sources for a topic
    Sources {
        /// Topic name (e.g., space, health, climate)
        topic: String,
    },
    /// Generate a counter-narrative for a claim
    Counter {
        /// Claim text
        text: String,
        /// Topic; extracted from the text when omitted
        #[arg(short, long)]
        topic: Option<String>,
    },
    /// Process a file with one claim per line
    Batch {
        /// Input file
        file: PathBuf,
        /// Claims processed at once
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum ConfigAction {
    /// Create a default workspace configuration file
    Init,
    /// Show the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Set up tracing: human-readable stderr + JSON file logging
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    let log_dir = directories::ProjectDirs::from("dev", "claimguard", "claimguard")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "claimguard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("claimguard_core=debug,claimguard=debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let mut config =
        claimguard_core::config::load_config(Some(&workspace), cli.config.as_deref(), None)
            .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    // Apply CLI overrides
    if let Some(model) = &cli.model {
        config.generative.model = model.clone();
    }
    if cli.offline {
        config.set_offline();
    }

    for warning in config.validate() {
        warn!("Config: {}", warning);
    }

    commands::handle_command(cli.command, &config, &workspace).await
}
