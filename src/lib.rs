// Fleetctl - Remote power and session control for managed daemons
// Library exports

pub mod api; // URL construction, failure classification, diagnostics
pub mod client; // HTTP transport for daemon actions
pub mod config;
pub mod daemon;
pub mod dispatch; // Background command dispatcher
pub mod notify;
pub mod session;
