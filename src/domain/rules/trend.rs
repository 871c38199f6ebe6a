use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::reading::{Trend, TrendResult};
use crate::domain::entities::sample::ParsedFeed;

/// Delta (°C) above which the temperature counts as rising
pub const RISING_DELTA: f64 = 1.0;
/// Delta (°C) below which the temperature counts as falling
pub const FALLING_DELTA: f64 = -0.5;
/// Position from the end of the preferred reference sample
const LOOKBACK: usize = 6;
/// Default freshness window for the latest sample
pub const DEFAULT_STALE_AFTER_MINS: i64 = 60;

/// Derives latest value, trend and staleness from a parsed feed.
/// Pure: the same feed and `now` always give the same result.
#[derive(Debug, Clone, Copy)]
pub struct TrendEvaluator {
    stale_after: Duration,
}

impl TrendEvaluator {
    #[must_use]
    pub const fn new(stale_after: Duration) -> Self {
        Self { stale_after }
    }

    #[must_use]
    pub const fn stale_after(&self) -> Duration {
        self.stale_after
    }

    #[must_use]
    pub fn evaluate(&self, feed: &ParsedFeed, now: DateTime<Utc>) -> TrendResult {
        let latest = feed.latest();
        let age = now.signed_duration_since(latest.timestamp);
        let delta = trend_delta(feed);

        TrendResult {
            latest_value: latest.value,
            latest_at: latest.timestamp,
            delta,
            trend: classify(delta),
            is_stale: age > self.stale_after,
            age_minutes: age.num_minutes(),
        }
    }
}

impl Default for TrendEvaluator {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_STALE_AFTER_MINS))
    }
}

/// Latest value minus the 6th-from-last sample, or the previous sample when
/// the feed is shorter, or zero for a single sample.
#[must_use]
pub fn trend_delta(feed: &ParsedFeed) -> f64 {
    let latest = feed.latest().value;
    feed.nth_from_end(LOOKBACK)
        .or_else(|| feed.nth_from_end(2))
        .map_or(0.0, |reference| latest - reference.value)
}

#[must_use]
pub fn classify(delta: f64) -> Trend {
    if delta > RISING_DELTA {
        Trend::Rising
    } else if delta < FALLING_DELTA {
        Trend::Falling
    } else {
        Trend::Flat
    }
}
