use anyhow::Result;
use novynar::{
    config::Config,
    fetcher::FeedFetcher,
    ingester::{Ingester, IngesterConfig},
    repositories::{NewsRepository, NewsStore},
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Open the store. This is the one unrecoverable condition: an
    // unreachable store at startup exits the process, there is no retry.
    let repository = NewsRepository::connect(config.database_url()).await?;
    repository.ping().await?;

    // Guarded bulk reset, never used in steady-state operation.
    if config.reset_on_start() {
        let removed = repository.clear_all().await?;
        info!(removed, "cleared news store before first cycle");
    }

    let ingester = Ingester::new(
        Arc::new(repository),
        FeedFetcher::new(),
        IngesterConfig {
            sources: config.feed_urls().to_vec(),
            poll_interval: config.poll_interval(),
            recovery_backoff: config.recovery_backoff(),
        },
    );

    // Graceful shutdown on ctrl-c.
    let shutdown_token = ingester.shutdown_token();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Received shutdown signal, initiating graceful shutdown...");
        shutdown_token.cancel();
    });

    ingester.run().await
}
