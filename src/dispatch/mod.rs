// Background command dispatcher
//
// Issues daemon actions without making the caller wait and turns each
// outcome into at most one operator notification. An expired session
// additionally clears the session credential and navigates to login.

mod context;
mod dispatcher;
mod notices;

pub use context::OpContext;
pub use dispatcher::{DispatchSettings, Dispatcher};
