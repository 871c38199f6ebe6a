pub mod feed_source;
pub mod messenger;
pub mod update_source;

pub use feed_source::{FeedSource, FetchError};
pub use messenger::{DeliveryError, Messenger};
pub use update_source::UpdateSource;
