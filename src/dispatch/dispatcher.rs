// Dispatcher implementation

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::task::TaskTracker;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use super::context::OpContext;
use super::notices;
use crate::api::{log_transport_failure, FailureReason, RequestError, ResponseCode};
use crate::client::{ActionResponse, DaemonTransport};
use crate::daemon::{DaemonOp, ShutdownOptions};
use crate::session::{Route, SESSION_COOKIE};

/// Tunables for how outcomes are reported
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Auto-dismiss time of every notice, also the delay before an expired
    /// session is cleared
    pub notice_life: Duration,
    /// Credential cleared when the session expires
    pub session_cookie: String,
    /// Emit a generic error notice for undocumented error statuses instead of
    /// only logging them
    pub notify_unrecognized: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            notice_life: Duration::from_millis(3000),
            session_cookie: SESSION_COOKIE.to_string(),
            notify_unrecognized: false,
        }
    }
}

/// Runs daemon actions in the background
///
/// `dispatch` returns immediately; the outcome is reported through the
/// context's notification sink once the transport call completes. Commands
/// are neither serialised nor de-duplicated, and never retried.
pub struct Dispatcher {
    transport: Arc<dyn DaemonTransport>,
    settings: DispatchSettings,
    tracker: TaskTracker,
    failures: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn DaemonTransport>) -> Self {
        Self {
            transport,
            settings: DispatchSettings::default(),
            tracker: TaskTracker::new(),
            failures: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_settings(mut self, settings: DispatchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Issue `op` against the context's daemon without waiting for it.
    ///
    /// If no options are given the daemon uses its defaults.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn dispatch(&self, op: DaemonOp, ctx: OpContext, options: Option<ShutdownOptions>) {
        let span = info_span!(
            "dispatch",
            id = %Uuid::new_v4(),
            op = %op,
            mac = %ctx.daemon.mac
        );
        let transport = Arc::clone(&self.transport);
        let settings = self.settings.clone();
        let tracker = self.tracker.clone();
        let failures = Arc::clone(&self.failures);

        self.tracker.spawn(
            async move {
                let result = perform(transport.as_ref(), op, &ctx.daemon.mac, options.as_ref()).await;
                if result.is_err() {
                    failures.fetch_add(1, Ordering::Relaxed);
                }
                report(op, &ctx, &settings, &tracker, result);
            }
            .instrument(span),
        );
    }

    /// Commands and scheduled session expiries still pending
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Commands that ended in any failure, notified or not
    pub fn failed(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Wait until every dispatched command and scheduled session expiry has
    /// finished. The dispatcher stays usable afterwards.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}

async fn perform(
    transport: &dyn DaemonTransport,
    op: DaemonOp,
    mac: &str,
    options: Option<&ShutdownOptions>,
) -> Result<ActionResponse, RequestError> {
    match op {
        DaemonOp::Boot => transport.boot(mac, options).await,
        DaemonOp::Logout => transport.logout(mac, options).await,
        DaemonOp::Reboot => transport.reboot(mac, options).await,
        DaemonOp::Shutdown => transport.shutdown(mac, options).await,
        DaemonOp::Restart => transport.restart(mac).await,
    }
}

fn report(
    op: DaemonOp,
    ctx: &OpContext,
    settings: &DispatchSettings,
    tracker: &TaskTracker,
    result: Result<ActionResponse, RequestError>,
) {
    match result {
        Ok(response) => {
            info!(status = response.status, "Daemon action succeeded");
            ctx.notifications
                .add(notices::success(op, &ctx.daemon, settings.notice_life));
        }
        Err(err) => report_failure(ctx, settings, tracker, &err),
    }
}

fn report_failure(
    ctx: &OpContext,
    settings: &DispatchSettings,
    tracker: &TaskTracker,
    err: &RequestError,
) {
    let classification = err.classify();

    if classification.reason != FailureReason::ErrorStatus {
        info!(reason = ?classification.reason, "Daemon action failed without a response");
        log_transport_failure(err);
        return;
    }

    let Some(code) = classification.code else {
        info!(status = ?err.status(), "Daemon action failed with an undocumented status");
        if settings.notify_unrecognized {
            ctx.notifications
                .add(notices::unrecognized(&ctx.daemon, err, settings.notice_life));
        } else {
            log_transport_failure(err);
        }
        return;
    };

    info!(status = code.status(), code = ?code, "Daemon action rejected");

    if code == ResponseCode::Unauthorized {
        schedule_session_expiry(ctx, settings, tracker);
    }

    ctx.notifications
        .add(notices::failure(code, &ctx.daemon, err, settings.notice_life));
}

/// After the notice life elapses, drop the session credential and go to login.
///
/// Not coordinated with other commands: concurrent 401s each schedule one.
/// Both steps are idempotent.
fn schedule_session_expiry(ctx: &OpContext, settings: &DispatchSettings, tracker: &TaskTracker) {
    let credentials = Arc::clone(&ctx.credentials);
    let navigator = Arc::clone(&ctx.navigator);
    let cookie = settings.session_cookie.clone();
    let delay = settings.notice_life;

    tracker.spawn(
        async move {
            tokio::time::sleep(delay).await;
            credentials.clear(&cookie);
            navigator.push(Route::Login);
            info!("Session expired, credential cleared");
        }
        .in_current_span(),
    );
}
