mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use patchwash_config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    // Load config once (writes the default file on first run)
    let config = Config::load()?;

    commands::watch::handle(cli, &config).await
}
