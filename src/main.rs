use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use subfeed::{App, FeedConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, path) = FeedConfig::load_default().context("loading configuration")?;

    // stdout belongs to the UI
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(config = %path.display(), source = %config.source, "Starting subfeed");
    App::run(config).await
}
