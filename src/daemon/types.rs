// Daemon descriptor

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity record for a controllable endpoint
///
/// Callers pass a snapshot of this for every command; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Daemon {
    /// Hardware address, the primary key
    pub mac: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Owning (logged in) user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

impl Daemon {
    pub fn new(mac: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            ip: None,
            user: None,
            hostname: None,
        }
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Human label for the daemon: `user@host` when both are known,
    /// otherwise whichever part is present.
    pub fn label(&self) -> String {
        let user = self.user.as_deref().filter(|u| !u.is_empty());
        let host = self.hostname.as_deref().filter(|h| !h.is_empty());

        match (user, host) {
            (Some(user), Some(host)) => format!("{}@{}", user, host),
            (Some(user), None) => user.to_string(),
            (None, Some(host)) => host.to_string(),
            (None, None) => "unknown host".to_string(),
        }
    }

    /// Whether `key` names this daemon, by MAC (case-insensitive) or hostname
    pub fn matches(&self, key: &str) -> bool {
        self.mac.eq_ignore_ascii_case(key) || self.hostname.as_deref() == Some(key)
    }
}

/// Renders as `label (mac)`, e.g. `alice@ws1 (AA:BB:CC:DD:EE:FF)`
impl fmt::Display for Daemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: &str = "AA:BB:CC:DD:EE:FF";

    #[test]
    fn test_label_with_user_and_host() {
        let daemon = Daemon::new(MAC).with_user("alice").with_hostname("ws1");
        assert_eq!(daemon.label(), "alice@ws1");
        assert_eq!(daemon.to_string(), "alice@ws1 (AA:BB:CC:DD:EE:FF)");
    }

    #[test]
    fn test_label_falls_back_when_parts_missing() {
        assert_eq!(Daemon::new(MAC).with_user("alice").label(), "alice");
        assert_eq!(Daemon::new(MAC).with_hostname("ws1").label(), "ws1");
        assert_eq!(Daemon::new(MAC).label(), "unknown host");

        // Empty strings count as absent
        let daemon = Daemon::new(MAC).with_user("").with_hostname("ws1");
        assert_eq!(daemon.label(), "ws1");
    }

    #[test]
    fn test_matches_mac_or_hostname() {
        let daemon = Daemon::new(MAC).with_hostname("ws1");
        assert!(daemon.matches("aa:bb:cc:dd:ee:ff"));
        assert!(daemon.matches("ws1"));
        assert!(!daemon.matches("ws2"));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let daemon: Daemon = serde_json::from_str(r#"{"mac":"AA:BB:CC:DD:EE:FF"}"#).unwrap();
        assert_eq!(daemon, Daemon::new(MAC));

        let json = serde_json::to_string(&daemon).unwrap();
        assert_eq!(json, r#"{"mac":"AA:BB:CC:DD:EE:FF"}"#);
    }
}
