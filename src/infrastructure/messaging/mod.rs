pub mod console;
pub mod telegram;
pub mod telegram_api;

pub use console::ConsoleMessenger;
pub use telegram::TelegramClient;
