use chrono::{DateTime, Utc};

use crate::application::messages;
use crate::application::services::reader::{FeedReader, ReadError};
use crate::domain::entities::message::IncomingMessage;
use crate::domain::ports::messenger::{DeliveryError, Messenger};

const SAUNA_COMMAND: &str = "/sauna";

/// What the dispatcher did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Replied,
    Unpinned,
    Ignored,
}

/// Routes incoming chat messages to their handlers.
pub struct CommandDispatcher<'a> {
    reader: &'a FeedReader<'a>,
    messenger: &'a dyn Messenger,
}

impl<'a> CommandDispatcher<'a> {
    #[must_use]
    pub const fn new(reader: &'a FeedReader<'a>, messenger: &'a dyn Messenger) -> Self {
        Self { reader, messenger }
    }

    /// Handle one message.
    ///
    /// Channel forwards are unpinned before any command parsing, so a
    /// forwarded post that happens to start with `/sauna` is only unpinned.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the reply or unpin request fails. Feed
    /// failures are not errors here; they become the reply text.
    pub async fn handle(
        &self,
        message: &IncomingMessage,
        now: DateTime<Utc>,
    ) -> Result<Handled, DeliveryError> {
        if message.is_from_channel() {
            tracing::info!(
                chat_id = message.chat_id,
                message_id = message.message_id,
                "Unpinning channel forward"
            );
            self.messenger
                .unpin_message(message.chat_id, message.message_id)
                .await?;
            return Ok(Handled::Unpinned);
        }

        if message.text.as_deref().is_some_and(is_sauna_command) {
            tracing::info!(chat_id = message.chat_id, "/sauna requested");
            let reply = match self.reader.read(now).await {
                Ok(reading) => messages::reading_reply(&reading),
                Err(e) => {
                    log_read_failure(&e);
                    messages::failure_reply(&e).to_string()
                }
            };
            self.messenger.reply_to(message, &reply).await?;
            return Ok(Handled::Replied);
        }

        tracing::debug!(
            chat_id = message.chat_id,
            "Ignoring message: {:?}",
            message.text
        );
        Ok(Handled::Ignored)
    }
}

fn log_read_failure(error: &ReadError) {
    match error {
        ReadError::Fetch(e) => tracing::warn!("Temperature fetch failed: {e}"),
        ReadError::Parse(e) => tracing::warn!("Temperature feed unusable: {e}"),
    }
}

/// `/sauna`, `/sauna@botname`, with or without trailing arguments.
fn is_sauna_command(text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    let command = first.split_once('@').map_or(first, |(command, _)| command);
    command == SAUNA_COMMAND
}
