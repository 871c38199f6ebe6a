use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::entities::reading::TrendResult;
use crate::domain::parser::{self, ParseError};
use crate::domain::ports::feed_source::{FeedSource, FetchError};
use crate::domain::rules::TrendEvaluator;
use crate::domain::value_objects::FeedFormat;

/// Why a poll produced no reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Fetch → parse → evaluate, without any alerting state.
///
/// Shared by the periodic poller and the on-demand `/sauna` command.
pub struct FeedReader<'a> {
    source: &'a dyn FeedSource,
    format: FeedFormat,
    evaluator: TrendEvaluator,
}

impl<'a> FeedReader<'a> {
    #[must_use]
    pub const fn new(
        source: &'a dyn FeedSource,
        format: FeedFormat,
        evaluator: TrendEvaluator,
    ) -> Self {
        Self {
            source,
            format,
            evaluator,
        }
    }

    /// Produce a fresh reading relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::Fetch` on transport failure and
    /// `ReadError::Parse` when the feed holds no valid samples.
    pub async fn read(&self, now: DateTime<Utc>) -> Result<TrendResult, ReadError> {
        let raw = self.source.fetch().await?;
        let feed = parser::parse(&raw, self.format, now)?;
        tracing::debug!(
            samples = feed.len(),
            endpoint = self.source.endpoint(),
            "feed parsed"
        );
        Ok(self.evaluator.evaluate(&feed, now))
    }
}
