use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::message::IncomingMessage;
use crate::domain::value_objects::ParseMode;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("failed to send message: {0}")]
    SendFailed(String),
    #[error("chat API rejected the request: {0}")]
    Rejected(String),
    #[error("chat API unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Messenger: Send + Sync {
    /// Send `text` to the chat identified by `destination`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message cannot be delivered.
    async fn send_message(
        &self,
        destination: &str,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), DeliveryError>;

    /// Reply to `incoming` in its own chat.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the reply cannot be delivered.
    async fn reply_to(&self, incoming: &IncomingMessage, text: &str) -> Result<(), DeliveryError>;

    /// Unpin a message in a chat.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the chat API refuses or is unreachable.
    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), DeliveryError>;
}
