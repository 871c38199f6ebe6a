use serde::{Deserialize, Serialize};

/// Layout of the remote temperature feed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// Comma-separated rows: `timestamp, entry_id, temperature, ...`
    #[default]
    Csv,
    /// One temperature value per line, no timestamps
    Bare,
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Bare => write!(f, "bare"),
        }
    }
}
