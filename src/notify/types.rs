// Notification data types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warn,
    Error,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Success => "success",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Info => "info",
        })
    }
}

/// A transient message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    /// Title
    pub summary: Option<String>,
    /// Body text
    pub detail: Option<String>,
    /// Auto-dismiss after this long; `None` keeps it until dismissed
    pub life: Option<Duration>,
}

impl Notification {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            summary: None,
            detail: None,
            life: None,
        }
    }

    pub fn success() -> Self {
        Self::new(Severity::Success)
    }

    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn life(mut self, life: Duration) -> Self {
        self.life = Some(life);
        self
    }
}
