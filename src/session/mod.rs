// Session capabilities
//
// Credential storage and navigation handed to the dispatcher explicitly.

mod credentials;
mod navigation;

pub use credentials::{CredentialStore, SessionStore, SESSION_COOKIE};
pub use navigation::{Navigator, Route, RouteTracker};
