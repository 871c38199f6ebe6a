use std::time::Duration;

use async_trait::async_trait;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

use super::telegram_api::{self, ApiResponse, Update};
use crate::domain::entities::message::{ChatUpdate, IncomingMessage};
use crate::domain::ports::messenger::{DeliveryError, Messenger};
use crate::domain::ports::update_source::UpdateSource;
use crate::domain::value_objects::ParseMode;

/// Telegram Bot API client.
///
/// The bot token is part of every request URL, so transport errors are
/// stripped of their URL before they are logged or returned.
pub struct TelegramClient {
    endpoint: String,
    client: reqwest::Client,
    request_timeout: Duration,
    long_poll: Duration,
}

impl TelegramClient {
    /// # Errors
    ///
    /// Returns `DeliveryError::Unavailable` if the HTTP client cannot be
    /// initialized.
    pub fn new(
        api_url: &str,
        bot_token: &str,
        request_timeout: Duration,
        long_poll: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("saunabot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DeliveryError::Unavailable(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: format!("{}/bot{bot_token}", api_url.trim_end_matches('/')),
            client,
            request_timeout,
            long_poll,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.endpoint)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<T, DeliveryError> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| transport_error(method, e))?;

        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            DeliveryError::SendFailed(format!(
                "{method}: unreadable response (HTTP {status}): {}",
                e.without_url()
            ))
        })?;

        if !body.ok {
            let reason = body
                .description
                .unwrap_or_else(|| format!("HTTP {status}"));
            return Err(DeliveryError::Rejected(format!("{method}: {reason}")));
        }

        body.result
            .ok_or_else(|| DeliveryError::SendFailed(format!("{method}: response has no result")))
    }
}

fn transport_error(method: &str, e: reqwest::Error) -> DeliveryError {
    let e = e.without_url();
    if e.is_connect() || e.is_timeout() {
        DeliveryError::Unavailable(format!("{method}: {e}"))
    } else {
        DeliveryError::SendFailed(format!("{method}: {e}"))
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_message(
        &self,
        destination: &str,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), DeliveryError> {
        let payload = telegram_api::send_message_payload(destination, text, mode);
        self.call::<IgnoredAny>("sendMessage", &payload, self.request_timeout)
            .await?;
        Ok(())
    }

    async fn reply_to(&self, incoming: &IncomingMessage, text: &str) -> Result<(), DeliveryError> {
        let payload = telegram_api::reply_payload(incoming, text);
        self.call::<IgnoredAny>("sendMessage", &payload, self.request_timeout)
            .await?;
        Ok(())
    }

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), DeliveryError> {
        let payload = telegram_api::unpin_payload(chat_id, message_id);
        self.call::<bool>("unpinChatMessage", &payload, self.request_timeout)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UpdateSource for TelegramClient {
    async fn poll_updates(&self, offset: Option<i64>) -> Result<Vec<ChatUpdate>, DeliveryError> {
        let payload = telegram_api::get_updates_payload(offset, self.long_poll.as_secs());
        let updates: Vec<Update> = self
            .call("getUpdates", &payload, self.long_poll + self.request_timeout)
            .await?;
        Ok(updates.into_iter().map(ChatUpdate::from).collect())
    }
}
