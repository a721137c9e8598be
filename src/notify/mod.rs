// Operator notifications
//
// Transient, severity-tagged messages and the sinks that receive them.

mod console;
mod sink;
mod types;

pub use console::ConsoleSink;
pub use sink::{ChannelSink, NotificationSink};
pub use types::{Notification, Severity};
