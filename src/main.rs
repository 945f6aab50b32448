use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod error;
mod flash;
mod handlers;
mod router;
mod schemas;
mod session;
mod views;

#[cfg(test)]
mod test_utils;

use cli::Cli;

/// Main entry point for the Notekeeper application.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notekeeper=debug,service=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `.env` feeds both the clap `env` fallbacks and the settings layer
    cli::load_dotenv(None);
    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
