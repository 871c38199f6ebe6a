use serde::{Deserialize, Serialize};

/// A chat message delivered to the bot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: Option<String>,
    /// Chat type of `sender_chat` when the message was posted on behalf of a chat
    pub sender_chat_kind: Option<String>,
}

impl IncomingMessage {
    /// Whether the message was auto-forwarded from a linked channel.
    #[must_use]
    pub fn is_from_channel(&self) -> bool {
        self.sender_chat_kind.as_deref() == Some("channel")
    }
}

/// One entry from the chat platform's update stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUpdate {
    /// Monotonic id; the next poll starts after the highest one seen
    pub update_id: i64,
    /// `None` for update kinds the bot does not handle
    pub message: Option<IncomingMessage>,
}
