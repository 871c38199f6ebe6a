use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::feed_source::{FeedSource, FetchError};

/// Fetches the raw feed over HTTP GET.
///
/// The timeout covers connect, headers and body. Failures are reported once;
/// the next poll tick is the retry.
pub struct HttpFeedFetcher {
    url: String,
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    /// # Errors
    ///
    /// Returns `FetchError::Request` if the HTTP client cannot be
    /// initialized (e.g. TLS backend failure).
    pub fn new(url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("saunabot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(format!("cannot build HTTP client: {e}")))?;

        Ok(Self { url, client })
    }
}

fn map_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(e.to_string())
    }
}

#[async_trait]
impl FeedSource for HttpFeedFetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self.client.get(&self.url).send().await.map_err(map_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(map_error)?;
        tracing::debug!(bytes = body.len(), "feed fetched");
        Ok(body)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
