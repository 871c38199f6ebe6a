use serde::{Deserialize, Serialize};

/// Hysteresis band for the "sauna is hot" notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Temperature (°C) strictly above which the notification fires
    pub hot: f64,
    /// Temperature (°C) strictly below which the notification re-arms
    pub reset: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            hot: 70.0,
            reset: 65.0,
        }
    }
}
