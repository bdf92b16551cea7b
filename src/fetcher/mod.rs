pub mod client;
pub mod errors;
pub mod identity;

pub use client::FeedFetcher;
pub use errors::FetchError;
pub use identity::{BROWSER_PROFILES, BrowserProfile};
