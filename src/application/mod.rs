pub mod config;
pub mod messages;
pub mod services;
