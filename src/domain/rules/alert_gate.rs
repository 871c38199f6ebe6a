use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::entities::reading::TrendResult;
use crate::domain::value_objects::{AlertThresholds, GateDecision};

/// Whether the hot notification has already been sent.
///
/// Starts un-notified. Every transition is a compare-and-swap, so gates
/// evaluated from concurrent tasks cannot both fire.
#[derive(Debug, Default)]
pub struct AlertState {
    notified: AtomicBool,
}

impl AlertState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notified: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_notified(&self) -> bool {
        self.notified.load(Ordering::Acquire)
    }

    fn transition(&self, from: bool, to: bool) -> bool {
        self.notified
            .compare_exchange(from, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// One-shot hot notification with a hysteresis band.
///
/// Fires once when fresh data exceeds `hot`, then stays quiet until the
/// temperature drops below `reset`. A reset does not require fresh data.
#[derive(Debug, Clone, Copy)]
pub struct AlertGate {
    thresholds: AlertThresholds,
}

impl AlertGate {
    #[must_use]
    pub const fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub const fn thresholds(&self) -> AlertThresholds {
        self.thresholds
    }

    pub fn evaluate(&self, result: &TrendResult, state: &AlertState) -> GateDecision {
        if !result.is_stale
            && result.latest_value > self.thresholds.hot
            && state.transition(false, true)
        {
            return GateDecision::Notify;
        }
        if result.latest_value < self.thresholds.reset && state.transition(true, false) {
            return GateDecision::Reset;
        }
        GateDecision::Suppress
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::new(AlertThresholds::default())
    }
}
