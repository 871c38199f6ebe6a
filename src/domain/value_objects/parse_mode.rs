use serde::{Deserialize, Serialize};

/// Text markup understood by the chat platform
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParseMode {
    #[default]
    Plain,
    Html,
}

impl ParseMode {
    /// Value of the Bot API `parse_mode` field, `None` for plain text.
    #[must_use]
    pub const fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Html => Some("HTML"),
        }
    }
}
