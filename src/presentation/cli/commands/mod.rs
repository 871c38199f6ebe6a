pub mod config;
pub mod daemon;
pub mod duty;
pub mod status;
