//! Configuration handling for the application.
//!
//! All runtime knobs are read once at startup into an immutable [`Config`]
//! that gets passed explicitly into the ingester and the API binary; nothing
//! reads environment state after that point.

use std::env;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable names. Keeping them public lets tests and deployment
/// tooling refer to them directly.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";
pub const ENV_FEED_URLS: &str = "FEED_URLS";
pub const ENV_POLL_INTERVAL_SECS: &str = "POLL_INTERVAL_SECS";
pub const ENV_RECOVERY_BACKOFF_SECS: &str = "RECOVERY_BACKOFF_SECS";
pub const ENV_RESET_ON_START: &str = "RESET_ON_START";

/// Default development values used when environment variables are absent.
const DEFAULT_DATABASE_URL: &str = "sqlite:novynar.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_FEED_URLS: &str = "https://rss.unian.net/site/news_ukr.rss";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_RECOVERY_BACKOFF_SECS: u64 = 60;

/// Application runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database_url: String,
    bind_addr: String,
    feed_urls: Vec<String>,
    poll_interval: Duration,
    recovery_backoff: Duration,
    reset_on_start: bool,
}

impl Config {
    /// Load from environment variables, falling back to development defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var(ENV_DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = env::var(ENV_BIND_ADDR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let feed_urls = parse_feed_urls(
            &env::var(ENV_FEED_URLS).unwrap_or_else(|_| DEFAULT_FEED_URLS.to_string()),
        )?;
        let poll_interval =
            parse_secs(ENV_POLL_INTERVAL_SECS, DEFAULT_POLL_INTERVAL_SECS)?;
        let recovery_backoff =
            parse_secs(ENV_RECOVERY_BACKOFF_SECS, DEFAULT_RECOVERY_BACKOFF_SECS)?;
        let reset_on_start = env::var(ENV_RESET_ON_START)
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            bind_addr,
            feed_urls,
            poll_interval,
            recovery_backoff,
            reset_on_start,
        })
    }

    /// Database connection string (SQLite URL).
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
    /// TCP bind address (host:port) for the read API.
    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
    /// Candidate feed URLs in fallback order.
    pub fn feed_urls(&self) -> &[String] {
        &self.feed_urls
    }
    /// Sleep between successful ingestion cycles.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
    /// Sleep after a failed ingestion cycle.
    pub fn recovery_backoff(&self) -> Duration {
        self.recovery_backoff
    }
    /// Whether to wipe the store once at startup before the first cycle.
    pub fn reset_on_start(&self) -> bool {
        self.reset_on_start
    }
}

fn parse_feed_urls(raw: &str) -> Result<Vec<String>, ConfigError> {
    let urls: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();
    if urls.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: ENV_FEED_URLS,
            reason: "at least one feed URL is required".to_string(),
        });
    }
    Ok(urls)
}

fn parse_secs(var: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(var) {
        Err(_) => Ok(Duration::from_secs(default)),
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|err| ConfigError::InvalidValue {
                field: var,
                reason: err.to_string(),
            }),
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue { field: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl Error for ConfigError {}
