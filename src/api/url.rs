// Endpoint addressing

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::daemon::DaemonOp;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_PREFIX: &str = "/api/v1";

const DAEMONS_COLLECTION: &str = "daemons";

/// Deployment environment, decides which host the API lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// API served from `localhost`
    Development,
    /// API served from the configured hostname
    #[default]
    Production,
}

impl Environment {
    pub fn resolve_host<'a>(&self, hostname: &'a str) -> &'a str {
        match self {
            Environment::Development => "localhost",
            Environment::Production => hostname,
        }
    }
}

/// Root of the daemon API (e.g. `http://localhost:3000/api/v1`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRoot {
    base: String,
}

impl ApiRoot {
    pub fn new(scheme: &str, host: &str, port: u16, prefix: &str) -> Self {
        Self {
            base: format!("{}://{}:{}{}", scheme, host, port, prefix),
        }
    }

    /// Default root for an environment: port 3000, prefix `/api/v1`
    pub fn for_environment(environment: Environment, hostname: &str) -> Self {
        Self::new(
            "http",
            environment.resolve_host(hostname),
            DEFAULT_PORT,
            DEFAULT_API_PREFIX,
        )
    }

    /// Use an already assembled base URL verbatim
    pub fn from_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Base URL for a daemon's actions (i.e. `{root}/daemons/{mac}`)
    ///
    /// The identifier is not validated; a malformed one surfaces as a
    /// transport failure.
    pub fn action_base_url(&self, mac: &str) -> String {
        format!("{}/{}/{}", self.base, DAEMONS_COLLECTION, mac)
    }

    /// Full URL for an operation on a daemon
    pub fn action_url(&self, mac: &str, op: DaemonOp) -> String {
        join_url(&[self.action_base_url(mac).as_str(), op.as_str()])
    }
}

impl fmt::Display for ApiRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

/// Join URL parts with forward slashes.
///
/// Parts are used as given: no separator is collapsed, so `"a/"` and `"b"`
/// produce `"a//b"`.
pub fn join_url<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}
