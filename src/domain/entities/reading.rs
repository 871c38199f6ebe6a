use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse short-term temperature movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Flat,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Falling => write!(f, "falling"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

/// Evaluation of one parsed feed against wall-clock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Value of the latest sample (°C)
    pub latest_value: f64,
    pub latest_at: DateTime<Utc>,
    /// Latest value minus the reference sample's value
    pub delta: f64,
    pub trend: Trend,
    pub is_stale: bool,
    /// Age of the latest sample in whole minutes (negative if in the future)
    pub age_minutes: i64,
}
