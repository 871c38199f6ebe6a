use serde::{Deserialize, Serialize};

/// What the alert gate decided for one poll
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GateDecision {
    /// Temperature crossed the hot threshold: send the notification
    Notify,
    /// Nothing to do
    Suppress,
    /// Temperature fell below the reset threshold: re-arm silently
    Reset,
}

impl std::fmt::Display for GateDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notify => write!(f, "notify"),
            Self::Suppress => write!(f, "suppress"),
            Self::Reset => write!(f, "reset"),
        }
    }
}
