//! StatefulChat - interactive chat CLI
//!
#![doc = "Main entry point for the StatefulChat application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statefulchat::cli::Cli;
use statefulchat::commands;
use statefulchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Pick up OPENAI_API_KEY and friends from a local .env file
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    tracing::debug!(
        "Using model {} with logs in {}",
        config.provider.model,
        config.storage.logs_dir
    );

    commands::chat::run_chat(config).await
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never interleave with the chat transcript.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "statefulchat=debug"
    } else {
        "statefulchat=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
