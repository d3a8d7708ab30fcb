//! renewal-launcher entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use renewal_launcher::cli::{in_lambda, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; CloudWatch stamps Lambda log lines itself
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if in_lambda() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).without_time())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    // Parse and execute CLI
    let cli = Cli::parse();
    cli.execute().await
}
