// Daemon operations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A remote command that can be issued against a daemon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaemonOp {
    /// Wake the machine (boot packet)
    Boot,
    /// Log the current user out
    Logout,
    Reboot,
    Shutdown,
    /// Restart the daemon process itself
    Restart,
}

impl DaemonOp {
    pub const ALL: [DaemonOp; 5] = [
        DaemonOp::Boot,
        DaemonOp::Logout,
        DaemonOp::Reboot,
        DaemonOp::Shutdown,
        DaemonOp::Restart,
    ];

    /// Wire name, used as the final path segment of the action URL
    pub fn as_str(&self) -> &'static str {
        match self {
            DaemonOp::Boot => "boot",
            DaemonOp::Logout => "logout",
            DaemonOp::Reboot => "reboot",
            DaemonOp::Shutdown => "shutdown",
            DaemonOp::Restart => "restart",
        }
    }

    /// Whether shutdown-style options are sent as the request body
    pub fn accepts_options(&self) -> bool {
        !matches!(self, DaemonOp::Restart)
    }
}

impl fmt::Display for DaemonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown daemon operation '{0}' (expected boot, logout, reboot, shutdown or restart)")]
pub struct ParseOpError(pub String);

impl FromStr for DaemonOp {
    type Err = ParseOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DaemonOp::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseOpError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_operations() {
        for op in DaemonOp::ALL {
            assert_eq!(op.as_str().parse::<DaemonOp>(), Ok(op));
        }
        assert_eq!("Reboot".parse::<DaemonOp>(), Ok(DaemonOp::Reboot));
    }

    #[test]
    fn test_parse_rejects_unknown_operation() {
        let err = "hibernate".parse::<DaemonOp>().unwrap_err();
        assert_eq!(err, ParseOpError("hibernate".to_string()));
        assert!(err.to_string().contains("hibernate"));
    }

    #[test]
    fn test_only_restart_drops_options() {
        assert!(DaemonOp::Shutdown.accepts_options());
        assert!(DaemonOp::Boot.accepts_options());
        assert!(!DaemonOp::Restart.accepts_options());
    }
}
