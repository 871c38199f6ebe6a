//! Wire types and request payloads for the Telegram Bot API.
//!
//! Only the fields the bot reads are modelled; serde ignores the rest.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::entities::message::{ChatUpdate, IncomingMessage};
use crate::domain::value_objects::ParseMode;

/// Envelope around every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
    pub sender_chat: Option<Chat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<Message> for IncomingMessage {
    fn from(message: Message) -> Self {
        Self {
            chat_id: message.chat.id,
            message_id: message.message_id,
            text: message.text,
            sender_chat_kind: message.sender_chat.map(|chat| chat.kind),
        }
    }
}

impl From<Update> for ChatUpdate {
    fn from(update: Update) -> Self {
        Self {
            update_id: update.update_id,
            message: update.message.map(IncomingMessage::from),
        }
    }
}

#[must_use]
pub fn send_message_payload(chat_id: &str, text: &str, mode: ParseMode) -> Value {
    let mut payload = json!({
        "chat_id": chat_id,
        "text": text,
    });
    if let Some(parse_mode) = mode.api_value() {
        payload["parse_mode"] = json!(parse_mode);
    }
    payload
}

#[must_use]
pub fn reply_payload(incoming: &IncomingMessage, text: &str) -> Value {
    json!({
        "chat_id": incoming.chat_id,
        "text": text,
        "reply_parameters": { "message_id": incoming.message_id },
    })
}

#[must_use]
pub fn unpin_payload(chat_id: i64, message_id: i64) -> Value {
    json!({
        "chat_id": chat_id,
        "message_id": message_id,
    })
}

#[must_use]
pub fn get_updates_payload(offset: Option<i64>, timeout_secs: u64) -> Value {
    let mut payload = json!({
        "timeout": timeout_secs,
        "allowed_updates": ["message"],
    });
    if let Some(offset) = offset {
        payload["offset"] = json!(offset);
    }
    payload
}
