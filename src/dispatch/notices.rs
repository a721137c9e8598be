// Notification text for dispatch outcomes

use serde_json::Value;
use std::time::Duration;

use crate::api::{RequestError, ResponseCode};
use crate::daemon::{Daemon, DaemonOp};
use crate::notify::Notification;

/// Shown when a 555 response carries no `error` field
pub(crate) const MISSING_DETAIL: &str = "no details provided";

pub(crate) fn success(op: DaemonOp, daemon: &Daemon, life: Duration) -> Notification {
    let detail = match op {
        DaemonOp::Boot => format!("Boot packet sent to {}.", daemon),
        DaemonOp::Logout => format!("Logout request sent to {}.", daemon),
        DaemonOp::Reboot => format!("Reboot request sent to {}.", daemon),
        DaemonOp::Shutdown => format!("Shutdown request sent to {}.", daemon),
        DaemonOp::Restart => format!("Daemon restart issued on {}.", daemon),
    };

    Notification::success()
        .summary("Success")
        .detail(detail)
        .life(life)
}

pub(crate) fn failure(
    code: ResponseCode,
    daemon: &Daemon,
    err: &RequestError,
    life: Duration,
) -> Notification {
    let (summary, detail) = match code {
        ResponseCode::Unauthorized => (
            "Session expired",
            format!(
                "Your session has expired, and you will need to log in again. \
                 Logging out in {}...",
                format_delay(life)
            ),
        ),
        ResponseCode::NotFound => (
            "Daemon not found",
            format!(
                "Daemon {} not found. The daemon may have been deregistered.",
                daemon
            ),
        ),
        ResponseCode::TooManyRequests => (
            "Too many requests",
            "You're issuing commands too quickly. Please wait a moment and try again."
                .to_string(),
        ),
        ResponseCode::InternalServerError => (
            "Server error",
            "The server reported an unspecified error. Please try again later.".to_string(),
        ),
        ResponseCode::OriginUnreachable => (
            "Daemon is unreachable",
            format!(
                "Daemon {} is not responding, and is probably offline.",
                daemon
            ),
        ),
        ResponseCode::DaemonError => (
            "Daemon reported error",
            format!(
                "Daemon {} reported that your request could not be fulfilled. Details: {}",
                daemon,
                daemon_error_detail(err)
            ),
        ),
    };

    Notification::error()
        .summary(summary)
        .detail(detail)
        .life(life)
}

/// Generic notice for an error status outside the documented set
pub(crate) fn unrecognized(daemon: &Daemon, err: &RequestError, life: Duration) -> Notification {
    let status = err
        .status()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Notification::error()
        .summary("Request failed")
        .detail(format!(
            "The server rejected the request for daemon {} with unexpected status {}.",
            daemon, status
        ))
        .life(life)
}

/// "3 seconds", "1 second", "1.5 seconds"
fn format_delay(life: Duration) -> String {
    let millis = life.as_millis();
    if millis % 1000 != 0 {
        return format!("{} seconds", life.as_secs_f64());
    }
    match millis / 1000 {
        1 => "1 second".to_string(),
        secs => format!("{} seconds", secs),
    }
}

/// The `error` field of the response body, verbatim when it is a string
fn daemon_error_detail(err: &RequestError) -> String {
    match err.response().and_then(|r| r.body.field("error")) {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Null) | None => MISSING_DETAIL.to_string(),
        Some(other) => other.to_string(),
    }
}
