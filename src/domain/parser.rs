//! Defensive parsing of the raw temperature feed.
//!
//! Malformed rows are dropped one by one; the parse as a whole only fails
//! when nothing usable is left.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

use crate::domain::entities::sample::{ParsedFeed, Sample, FEED_TIMESTAMP_FORMAT};
use crate::domain::value_objects::FeedFormat;

/// Zero-based position of the timestamp column in CSV rows.
const TIMESTAMP_FIELD: usize = 0;
/// Zero-based position of the temperature column in CSV rows.
const VALUE_FIELD: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("feed contains no valid samples ({dropped} row(s) dropped)")]
    EmptyFeed { dropped: usize },
}

/// Parse `raw` according to `format`.
///
/// `received_at` stamps samples of formats that carry no timestamps.
///
/// # Errors
///
/// Returns `ParseError::EmptyFeed` if no row yields a valid sample.
pub fn parse(
    raw: &str,
    format: FeedFormat,
    received_at: DateTime<Utc>,
) -> Result<ParsedFeed, ParseError> {
    match format {
        FeedFormat::Csv => parse_csv(raw),
        FeedFormat::Bare => parse_bare(raw, received_at),
    }
}

/// Parse CSV rows of the form `timestamp, entry_id, temperature, ...`.
///
/// The first row is skipped as a header when its temperature column is not
/// numeric, so feeds with and without a header are both accepted.
///
/// # Errors
///
/// Returns `ParseError::EmptyFeed` if no row yields a valid sample.
pub fn parse_csv(raw: &str) -> Result<ParsedFeed, ParseError> {
    let mut lines = non_blank_lines(raw).peekable();

    if lines.peek().is_some_and(|first| is_csv_header(first)) {
        lines.next();
    }

    let mut samples = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        match parse_csv_row(line) {
            Some(sample) => samples.push(sample),
            None => {
                dropped += 1;
                tracing::debug!("Dropping malformed feed row: {line:?}");
            }
        }
    }

    finish(samples, dropped)
}

/// Parse a feed with one temperature value per line.
///
/// Every sample is stamped with `received_at`.
///
/// # Errors
///
/// Returns `ParseError::EmptyFeed` if no line holds a valid value.
pub fn parse_bare(raw: &str, received_at: DateTime<Utc>) -> Result<ParsedFeed, ParseError> {
    let mut lines = non_blank_lines(raw).peekable();

    if lines.peek().is_some_and(|first| parse_value(first).is_none()) {
        lines.next();
    }

    let mut samples = Vec::new();
    let mut dropped = 0usize;
    for line in lines {
        match parse_value(line) {
            Some(value) => samples.push(Sample {
                timestamp: received_at,
                value,
            }),
            None => {
                dropped += 1;
                tracing::debug!("Dropping malformed feed line: {line:?}");
            }
        }
    }

    finish(samples, dropped)
}

fn finish(samples: Vec<Sample>, dropped: usize) -> Result<ParsedFeed, ParseError> {
    if dropped > 0 {
        tracing::debug!(kept = samples.len(), dropped, "feed rows dropped");
    }
    ParsedFeed::from_samples(samples).ok_or(ParseError::EmptyFeed { dropped })
}

fn non_blank_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

fn is_csv_header(line: &str) -> bool {
    line.split(',')
        .nth(VALUE_FIELD)
        .is_some_and(|field| !field.trim().is_empty() && parse_value(field).is_none())
}

fn parse_csv_row(line: &str) -> Option<Sample> {
    let fields: Vec<&str> = line.split(',').collect();
    let value_field = fields.get(VALUE_FIELD)?;
    if value_field.trim().is_empty() {
        return None;
    }
    let timestamp = parse_timestamp(fields.get(TIMESTAMP_FIELD)?)?;
    let value = parse_value(value_field)?;
    Some(Sample { timestamp, value })
}

/// `YYYY-MM-DD HH:MM:SS` with an optional ` UTC` suffix, or RFC 3339.
fn parse_timestamp(field: &str) -> Option<DateTime<Utc>> {
    let field = field.trim();
    let naive = field.strip_suffix("UTC").map_or(field, str::trim_end);
    if let Ok(parsed) = NaiveDateTime::parse_from_str(naive, FEED_TIMESTAMP_FORMAT) {
        return Some(parsed.and_utc());
    }
    DateTime::parse_from_rfc3339(field)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_value(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
