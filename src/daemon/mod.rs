// Daemon data model
//
// Identity records for controllable endpoints and the closed set of
// operations that can be issued against them.

mod op;
mod options;
mod types;

pub use op::{DaemonOp, ParseOpError};
pub use options::ShutdownOptions;
pub use types::Daemon;
