use rand::Rng;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, HeaderMap, HeaderValue, REFERER, USER_AGENT,
};

/// One realistic browser identity. Feed hosts run anti-scraping heuristics
/// against default HTTP client signatures, so every request presents itself
/// as an ordinary desktop browser instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserProfile {
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: &'static str,
    pub cache_control: &'static str,
    pub referer: Option<&'static str>,
}

impl BrowserProfile {
    pub fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(self.accept_language),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(self.cache_control));
        if let Some(referer) = self.referer {
            headers.insert(REFERER, HeaderValue::from_static(referer));
        }
        headers
    }
}

/// Fixed identity pool; one entry is picked uniformly at random per request.
pub const BROWSER_PROFILES: &[BrowserProfile] = &[
    BrowserProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                     (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
        accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        accept_language: "uk-UA,uk;q=0.8,en-US;q=0.5,en;q=0.3",
        cache_control: "max-age=0",
        referer: Some("https://korrespondent.net/"),
    },
    BrowserProfile {
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:123.0) Gecko/20100101 \
                     Firefox/123.0",
        accept: "application/rss+xml,text/xml;q=0.9,*/*;q=0.8",
        accept_language: "uk-UA,uk;q=0.8,en-US;q=0.5,en;q=0.3",
        cache_control: "no-cache",
        referer: None,
    },
];

/// Uniform random pick from a profile pool.
pub fn random_profile(profiles: &'static [BrowserProfile]) -> &'static BrowserProfile {
    &profiles[rand::thread_rng().gen_range(0..profiles.len())]
}
