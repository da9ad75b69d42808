#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),

    #[error("HTTP {status} from {url}")]
    Http {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
