use std::time::Duration;

use chrono::Utc;

use super::dispatcher::CommandDispatcher;
use crate::domain::ports::messenger::DeliveryError;
use crate::domain::ports::update_source::UpdateSource;

/// Pause after a failed long poll before trying again.
pub const RETRY_PAUSE: Duration = Duration::from_secs(5);

/// Long-polls the chat for updates and feeds messages to the dispatcher.
pub struct UpdateListener<'a> {
    source: &'a dyn UpdateSource,
    dispatcher: &'a CommandDispatcher<'a>,
    retry_pause: Duration,
}

impl<'a> UpdateListener<'a> {
    #[must_use]
    pub const fn new(source: &'a dyn UpdateSource, dispatcher: &'a CommandDispatcher<'a>) -> Self {
        Self {
            source,
            dispatcher,
            retry_pause: RETRY_PAUSE,
        }
    }

    #[must_use]
    pub fn with_retry_pause(mut self, retry_pause: Duration) -> Self {
        self.retry_pause = retry_pause;
        self
    }

    /// Fetch one batch, dispatch it and return the offset for the next poll.
    ///
    /// The offset moves past every update in the batch, including those
    /// whose handling failed, so a poisoned update is never redelivered.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the batch itself cannot be fetched.
    pub async fn poll_once(&self, offset: Option<i64>) -> Result<Option<i64>, DeliveryError> {
        let updates = self.source.poll_updates(offset).await?;
        let mut next = offset;

        for update in updates {
            let after = update.update_id + 1;
            next = Some(next.map_or(after, |current| current.max(after)));

            let Some(message) = update.message else {
                continue;
            };
            match self.dispatcher.handle(&message, Utc::now()).await {
                Ok(handled) => {
                    tracing::debug!(update_id = update.update_id, "Update handled: {handled:?}");
                }
                Err(e) => tracing::warn!(update_id = update.update_id, "Update failed: {e}"),
            }
        }

        Ok(next)
    }

    /// Poll forever.
    pub async fn run(&self) {
        tracing::info!("Listening for chat commands");
        let mut offset = None;
        loop {
            match self.poll_once(offset).await {
                Ok(next) => offset = next,
                Err(e) => {
                    tracing::warn!("Update poll failed: {e}");
                    tokio::time::sleep(self.retry_pause).await;
                }
            }
        }
    }
}
