use async_trait::async_trait;

use crate::domain::entities::message::ChatUpdate;
use crate::domain::ports::messenger::DeliveryError;

#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Wait for the next batch of updates with id `>= offset`.
    ///
    /// May return an empty batch when the wait times out.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the chat API refuses or is unreachable.
    async fn poll_updates(&self, offset: Option<i64>) -> Result<Vec<ChatUpdate>, DeliveryError>;
}
