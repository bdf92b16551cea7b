use thiserror::Error;

/// Ways a single feed fetch can fail. All of them are recoverable at the
/// cycle level: the caller moves to the next candidate source, or waits for
/// the next cycle if every source failed.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("network error: {0}")]
    Network(String),

    #[error("io error: {0}")]
    Io(String),
}

impl FetchError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else {
            // DNS failures, refused connections, TLS-level problems
            Self::Network(err.to_string())
        }
    }
}
