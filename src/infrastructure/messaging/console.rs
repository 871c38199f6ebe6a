use std::borrow::Cow;

use async_trait::async_trait;
use colored::Colorize;

use crate::domain::entities::message::IncomingMessage;
use crate::domain::ports::messenger::{DeliveryError, Messenger};
use crate::domain::value_objects::ParseMode;

const SEPARATOR_WIDTH: usize = 50;

/// Prints outgoing messages to stdout instead of delivering them.
///
/// Used by `run --dry-run` and the `duty` preview.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMessenger;

impl ConsoleMessenger {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send_message(
        &self,
        destination: &str,
        text: &str,
        mode: ParseMode,
    ) -> Result<(), DeliveryError> {
        let separator = "\u{2500}".repeat(SEPARATOR_WIDTH);
        let body = match mode {
            ParseMode::Html => strip_tags(text),
            ParseMode::Plain => Cow::Borrowed(text),
        };

        println!("{}", separator.dimmed());
        println!("{} {}", "\u{2192}".cyan().bold(), sanitize(destination).bold());
        println!("{}", sanitize(&body));
        println!("{}", separator.dimmed());
        Ok(())
    }

    async fn reply_to(&self, incoming: &IncomingMessage, text: &str) -> Result<(), DeliveryError> {
        println!(
            "{} {} {}",
            "\u{21a9}".cyan().bold(),
            format!("{}#{}", incoming.chat_id, incoming.message_id).dimmed(),
            sanitize(text)
        );
        Ok(())
    }

    async fn unpin_message(&self, chat_id: i64, message_id: i64) -> Result<(), DeliveryError> {
        println!(
            "{} {}",
            "unpin".yellow().bold(),
            format!("{chat_id}#{message_id}").dimmed()
        );
        Ok(())
    }
}

/// Drop HTML tags so announcements read cleanly in a terminal.
fn strip_tags(s: &str) -> Cow<'_, str> {
    if !s.contains('<') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Remove control characters that could drive the terminal.
fn sanitize(s: &str) -> Cow<'_, str> {
    let is_control = |c: char| matches!(c as u32, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F);
    if s.chars().any(is_control) {
        Cow::Owned(s.chars().filter(|&c| !is_control(c)).collect())
    } else {
        Cow::Borrowed(s)
    }
}
