use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Mutex;

use saunabot::domain::entities::message::IncomingMessage;
use saunabot::domain::ports::feed_source::{FeedSource, FetchError};
use saunabot::domain::ports::messenger::{DeliveryError, Messenger};
use saunabot::domain::value_objects::ParseMode;

// ---------------------------------------------------------------------------
// Fixture loader
// ---------------------------------------------------------------------------

pub fn load_fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).expect("Failed to read fixture")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .expect("valid timestamp")
}

// ---------------------------------------------------------------------------
// SwappableSource: a feed whose body can change between polls
// ---------------------------------------------------------------------------

pub struct SwappableSource {
    body: Mutex<Result<String, FetchError>>,
}

impl SwappableSource {
    pub fn new(body: Result<String, FetchError>) -> Self {
        Self {
            body: Mutex::new(body),
        }
    }

    pub fn set(&self, body: Result<String, FetchError>) {
        *self.body.lock().expect("lock") = body;
    }
}

#[async_trait]
impl FeedSource for SwappableSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.body.lock().expect("lock").clone()
    }

    fn endpoint(&self) -> &str {
        "fixture"
    }
}

// ---------------------------------------------------------------------------
// RecordingMessenger
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    Message {
        destination: String,
        text: String,
        mode: ParseMode,
    },
    Reply {
        message_id: i64,
        text: String,
    },
    Unpin {
        chat_id: i64,
        message_id: i64,
    },
}

#[derive(Default)]
pub struct RecordingMessenger {
    outgoing: Mutex<Vec<Outgoing>>,
}

impl RecordingMessenger {
    pub fn outgoing(&self) -> Vec<Outgoing> {
        self.outgoing.lock().expect("lock").clone()
    }

    fn record(&self, item: Outgoing) {
        self.outgoing.lock().expect("lock").push(item);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_message(
        &self,
        destination: &str,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), DeliveryError> {
        self.record(Outgoing::Message {
            destination: destination.to_string(),
            text: text.to_string(),
            mode,
        });
        Ok(())
    }

    async fn reply_to(&self, incoming: &IncomingMessage, text: &str) -> Result<(), DeliveryError> {
        self.record(Outgoing::Reply {
            message_id: incoming.message_id,
            text: text.to_string(),
        });
        Ok(())
    }

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), DeliveryError> {
        self.record(Outgoing::Unpin {
            chat_id,
            message_id,
        });
        Ok(())
    }
}
