pub mod message;
pub mod reading;
pub mod sample;

pub use message::{ChatUpdate, IncomingMessage};
pub use reading::{Trend, TrendResult};
pub use sample::{ParsedFeed, Sample};
