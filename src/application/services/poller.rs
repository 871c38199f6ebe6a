use chrono::{DateTime, Utc};

use super::reader::{FeedReader, ReadError};
use crate::application::messages;
use crate::domain::entities::reading::TrendResult;
use crate::domain::ports::messenger::Messenger;
use crate::domain::rules::{AlertGate, AlertState};
use crate::domain::value_objects::{GateDecision, ParseMode};

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub reading: TrendResult,
    pub decision: GateDecision,
    /// Whether the hot notification reached the chat (only meaningful on `Notify`)
    pub delivered: bool,
}

/// Orchestrates a poll cycle: read → gate → notify.
pub struct PollerService<'a> {
    reader: &'a FeedReader<'a>,
    gate: AlertGate,
    state: &'a AlertState,
    messenger: &'a dyn Messenger,
    destination: &'a str,
}

impl<'a> PollerService<'a> {
    #[must_use]
    pub const fn new(
        reader: &'a FeedReader<'a>,
        gate: AlertGate,
        state: &'a AlertState,
        messenger: &'a dyn Messenger,
        destination: &'a str,
    ) -> Self {
        Self {
            reader,
            gate,
            state,
            messenger,
            destination,
        }
    }

    /// Run one cycle against wall-clock `now`.
    ///
    /// A failed delivery is logged and does not roll back the alert state:
    /// the next notification waits for a reset like any other.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if the feed cannot be fetched or holds no valid
    /// samples; the alert state is left untouched in that case.
    pub async fn run_once(&self, now: DateTime<Utc>) -> Result<PollOutcome, ReadError> {
        let reading = self.reader.read(now).await?;
        let decision = self.gate.evaluate(&reading, self.state);

        let mut delivered = false;
        match decision {
            GateDecision::Notify => {
                tracing::info!(
                    "Sauna above {:.0}°C ({:.1}°C), notifying",
                    self.gate.thresholds().hot,
                    reading.latest_value
                );
                let text = messages::hot_alert(self.gate.thresholds().hot);
                match self
                    .messenger
                    .send_message(self.destination, &text, ParseMode::Html)
                    .await
                {
                    Ok(()) => delivered = true,
                    Err(e) => tracing::warn!("Hot notification failed: {e}"),
                }
            }
            GateDecision::Reset => {
                tracing::info!(
                    "Sauna cooled to {:.1}°C, notification re-armed",
                    reading.latest_value
                );
            }
            GateDecision::Suppress => {
                if reading.is_stale {
                    tracing::debug!(
                        "Feed stale ({} min), latest {:.1}°C",
                        reading.age_minutes,
                        reading.latest_value
                    );
                }
            }
        }

        Ok(PollOutcome {
            reading,
            decision,
            delivered,
        })
    }
}
