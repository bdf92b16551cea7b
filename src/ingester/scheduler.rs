use crate::fetcher::FeedFetcher;
use crate::parser;
use crate::repositories::NewsStore;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

use crate::entities::NewsItem;

/// Scheduler configuration
#[derive(Clone)]
pub struct IngesterConfig {
    /// Candidate feed URLs, tried in order each cycle.
    pub sources: Vec<String>,
    /// Sleep between cycles while in the normal state.
    pub poll_interval: Duration,
    /// Longer sleep taken after a cycle-level failure.
    pub recovery_backoff: Duration,
}

impl Default for IngesterConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            poll_interval: Duration::from_secs(30),
            recovery_backoff: Duration::from_secs(60),
        }
    }
}

/// Scheduler state between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestState {
    /// Normal operation: next sleep is the poll interval.
    Cycling,
    /// Last cycle failed unexpectedly: next sleep is the recovery backoff.
    Recovering,
}

/// Counts from one fetch→parse→persist pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub parsed: usize,
    pub inserted: usize,
}

/// Drives the ingestion loop until the process terminates or the
/// cancellation token fires.
pub struct Ingester {
    store: Arc<dyn NewsStore>,
    fetcher: FeedFetcher,
    config: IngesterConfig,
    ingester_id: Uuid,
    shutdown_token: CancellationToken,
}

impl Ingester {
    pub fn new(store: Arc<dyn NewsStore>, fetcher: FeedFetcher, config: IngesterConfig) -> Self {
        Self {
            store,
            fetcher,
            config,
            ingester_id: Uuid::new_v4(),
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Token the hosting process can cancel for graceful shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Run cycles forever at the configured cadence. Per-cycle failures are
    /// contained here: they log, switch the state machine to `Recovering`
    /// for one longer sleep, and the loop continues.
    pub async fn run(self) -> Result<()> {
        info!(
            ingester_id = %self.ingester_id,
            sources = self.config.sources.len(),
            poll_interval_secs = self.config.poll_interval.as_secs(),
            "starting ingestion loop"
        );

        let mut state = IngestState::Cycling;
        loop {
            if self.shutdown_token.is_cancelled() {
                break;
            }

            let outcome = self
                .run_cycle()
                .instrument(info_span!("cycle", ingester_id = %self.ingester_id))
                .await;

            state = match outcome {
                Ok(stats) => {
                    info!(
                        parsed = stats.parsed,
                        inserted = stats.inserted,
                        "update cycle completed"
                    );
                    IngestState::Cycling
                }
                Err(error) => {
                    error!(%error, "error in update cycle, backing off");
                    IngestState::Recovering
                }
            };

            let delay = match state {
                IngestState::Cycling => self.config.poll_interval,
                IngestState::Recovering => self.config.recovery_backoff,
            };

            tokio::select! {
                _ = self.shutdown_token.cancelled() => {
                    info!("shutdown requested, stopping ingestion loop");
                    break;
                }
                _ = sleep(delay) => {}
            }
        }

        Ok(())
    }

    /// One fetch→parse→persist pass. Zero entries is not an error: it is
    /// logged and the caller sleeps the normal interval.
    pub async fn run_cycle(&self) -> Result<CycleStats> {
        let entries = self.collect_entries(Utc::now()).await;
        if entries.is_empty() {
            warn!("no entries were parsed in this cycle");
            return Ok(CycleStats::default());
        }

        let parsed = entries.len();
        let mut inserted = 0_usize;
        for entry in &entries {
            match self.store.persist_if_new(entry).await {
                Ok(true) => {
                    inserted += 1;
                    info!(title = %entry.title, "saved new entry");
                }
                Ok(false) => {
                    debug!(link = %entry.link, "entry already stored");
                }
                Err(error) => {
                    // Skip-and-log: one bad write never aborts the batch.
                    warn!(%error, link = %entry.link, "failed to persist entry, skipping");
                }
            }
        }

        Ok(CycleStats { parsed, inserted })
    }

    /// Walk the candidate sources in declared order; the first one that both
    /// fetches and parses to a non-empty batch wins and later candidates are
    /// not contacted.
    async fn collect_entries(&self, now: DateTime<Utc>) -> Vec<NewsItem> {
        for url in &self.config.sources {
            let bytes = match self.fetcher.fetch(url).await {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!(%error, url = %url, "feed fetch failed, trying next candidate");
                    continue;
                }
            };

            match parser::parse_entries(&bytes, now) {
                Ok(entries) if entries.is_empty() => {
                    warn!(url = %url, "no entries found in feed");
                }
                Ok(entries) => {
                    info!(url = %url, count = entries.len(), "parsed feed entries");
                    return entries;
                }
                Err(error) => {
                    error!(%error, url = %url, "feed parsing failed, trying next candidate");
                }
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockNewsStore;

    fn quiet_ingester() -> Ingester {
        Ingester::new(
            Arc::new(MockNewsStore::new()),
            FeedFetcher::new(),
            IngesterConfig::default(),
        )
    }

    #[tokio::test]
    async fn empty_source_list_is_a_quiet_cycle() {
        let stats = quiet_ingester().run_cycle().await.unwrap();
        assert_eq!(stats, CycleStats::default());
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_loop() {
        let ingester = quiet_ingester();
        let token = ingester.shutdown_token();

        let handle = tokio::spawn(ingester.run());
        token.cancel();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop must stop after cancellation")
            .unwrap()
            .unwrap();
    }
}
