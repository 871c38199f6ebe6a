use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("feed request timed out")]
    Timeout,
    #[error("feed returned HTTP {0}")]
    HttpStatus(u16),
    #[error("feed request failed: {0}")]
    Request(String),
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the raw feed text. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` on timeout, a non-success status, or any
    /// other transport failure.
    async fn fetch(&self) -> Result<String, FetchError>;

    /// Where the feed is fetched from, for diagnostics.
    fn endpoint(&self) -> &str;
}
