use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the CSV feed (always UTC).
///
/// `%.f` writes no fraction for whole seconds and parses one if present.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One temperature reading from the feed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    /// Temperature in °C
    pub value: f64,
}

/// Ordered, non-empty sequence of samples from a single poll.
///
/// Order is the feed's row order; the last sample is the latest one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFeed {
    samples: Vec<Sample>,
}

impl ParsedFeed {
    /// Wraps `samples`, returning `None` when there are none.
    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Option<Self> {
        if samples.is_empty() {
            None
        } else {
            Some(Self { samples })
        }
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> &Sample {
        // Non-empty by construction.
        &self.samples[self.samples.len() - 1]
    }

    /// Sample `n` positions from the end (`1` is the latest).
    #[must_use]
    pub fn nth_from_end(&self, n: usize) -> Option<&Sample> {
        if n == 0 || n > self.samples.len() {
            return None;
        }
        self.samples.get(self.samples.len() - n)
    }

    /// Serializes back to the CSV feed layout, header included.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("created_at,entry_id,field1\n");
        for (i, sample) in self.samples.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} UTC,{},{}",
                sample.timestamp.format(FEED_TIMESTAMP_FORMAT),
                i + 1,
                sample.value
            );
        }
        out
    }
}
