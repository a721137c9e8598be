// HTTP client for daemon actions
//
// Provides the DaemonTransport trait and its reqwest implementation.
// Transports surface raw failures; they never retry or interpret them.

mod http;
mod transport;

pub use http::HttpTransport;
pub use transport::{ActionResponse, DaemonTransport};
