pub mod duty;
pub mod poller;
pub mod reader;
