//! Deterministic evaluation of parsed feeds. No I/O happens here.

pub mod alert_gate;
pub mod trend;

pub use alert_gate::{AlertGate, AlertState};
pub use trend::TrendEvaluator;
