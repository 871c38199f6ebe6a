pub mod feed_format;
pub mod gate_decision;
pub mod parse_mode;
pub mod thresholds;

pub use feed_format::FeedFormat;
pub use gate_decision::GateDecision;
pub use parse_mode::ParseMode;
pub use thresholds::AlertThresholds;
