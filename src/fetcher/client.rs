use crate::fetcher::{
    errors::FetchError,
    identity::{BROWSER_PROFILES, BrowserProfile, random_profile},
};
use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, info, instrument};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP retrieval of raw feed bytes.
///
/// Certificate validation is disabled: some candidate feed hosts serve
/// misconfigured chains, and the feed must stay reachable through them.
/// This is a trust/availability tradeoff, not a security boundary.
pub struct FeedFetcher {
    client: Client,
    profiles: &'static [BrowserProfile],
}

impl FeedFetcher {
    pub fn new() -> Self {
        Self::with_profiles(BROWSER_PROFILES)
    }

    pub fn with_profiles(profiles: &'static [BrowserProfile]) -> Self {
        let client = ClientBuilder::new()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(FETCH_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("Failed to build HTTP client");
        Self { client, profiles }
    }

    /// Fetch one candidate source. No retry happens inside this call;
    /// retries are the outer cycle cadence.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed_url = url::Url::parse(url)?;
        let profile = random_profile(self.profiles);
        debug!(user_agent = profile.user_agent, "selected browser identity");

        let response = self
            .client
            .get(parsed_url)
            .headers(profile.header_map())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        info!(bytes = body.len(), "fetched feed payload");
        Ok(body)
    }
}

impl Default for FeedFetcher {
    fn default() -> Self {
        Self::new()
    }
}
