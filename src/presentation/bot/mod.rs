pub mod dispatcher;
pub mod listener;

pub use dispatcher::{CommandDispatcher, Handled};
pub use listener::UpdateListener;
