use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{
    layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use newsdesk_core::AppConfig;

mod bot;
mod commands;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(author, version, about = "Posts sentiment-tagged news headlines to a Discord channel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config.toml (defaults to ~/.config/newsdesk/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord, post on a schedule and answer the news command
    Run,
    /// Post one round of headlines and exit
    Once,
    /// Print analyzed headlines without posting anything
    Preview,
}

/// Filter used until the config file has been read
const DEFAULT_LOG_LEVEL: &str = "info";

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Subscriber whose level filter can be swapped once configuration is loaded
fn logging(filter: &str) -> (impl tracing::Subscriber + Send + Sync + 'static, FilterHandle) {
    let (filter, handle) = reload::Layer::new(EnvFilter::new(filter));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false));
    (subscriber, handle)
}

/// RUST_LOG wins over the configured level
fn log_filter(rust_log: Option<&str>, configured: &str) -> String {
    rust_log.unwrap_or(configured).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging before anything else so config loading is traced
    let rust_log = std::env::var("RUST_LOG").ok();
    let (subscriber, filter_handle) = logging(&log_filter(rust_log.as_deref(), DEFAULT_LOG_LEVEL));
    subscriber.init();

    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config {
        Some(ref path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    if rust_log.is_none() {
        filter_handle.reload(EnvFilter::new(&config.general.log_level))?;
    }

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Once) => commands::once::run(config).await,
        Some(Commands::Preview) => commands::preview::run(config).await,
    }
}
