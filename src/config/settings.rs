// Configuration structs

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::{ApiRoot, Environment, DEFAULT_API_PREFIX, DEFAULT_PORT};
use crate::daemon::Daemon;
use crate::dispatch::DispatchSettings;
use crate::session::SESSION_COOKIE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `development` talks to localhost, `production` to `hostname`
    pub environment: Environment,

    pub scheme: String,

    /// API host in production
    pub hostname: String,

    pub port: u16,

    /// Path prefix of the API (default: /api/v1)
    pub api_prefix: String,

    /// Notice auto-dismiss time and session expiry delay, in milliseconds
    pub notice_life_ms: u64,

    /// Name of the session cookie
    pub session_cookie: String,

    /// Session credential sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// Show a generic error for undocumented error statuses
    pub notify_unrecognized: bool,

    /// Known daemons
    pub daemons: Vec<Daemon>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            scheme: "http".to_string(),
            hostname: "localhost".to_string(),
            port: DEFAULT_PORT,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            notice_life_ms: 3000,
            session_cookie: SESSION_COOKIE.to_string(),
            session_token: None,
            notify_unrecognized: false,
            daemons: Vec::new(),
        }
    }
}

impl Config {
    pub fn api_root(&self) -> ApiRoot {
        ApiRoot::new(
            &self.scheme,
            self.environment.resolve_host(&self.hostname),
            self.port,
            &self.api_prefix,
        )
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            notice_life: Duration::from_millis(self.notice_life_ms),
            session_cookie: self.session_cookie.clone(),
            notify_unrecognized: self.notify_unrecognized,
        }
    }

    /// Look up a configured daemon by MAC or hostname
    pub fn find_daemon(&self, key: &str) -> Option<&Daemon> {
        self.daemons.iter().find(|d| d.matches(key))
    }
}
