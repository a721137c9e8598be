// Per-dispatch context

use std::sync::Arc;

use crate::daemon::Daemon;
use crate::notify::NotificationSink;
use crate::session::{CredentialStore, Navigator};

/// Target daemon plus the capabilities a dispatch may act through.
///
/// Built fresh by the caller for every command; the dispatcher keeps it only
/// until the command has been reported.
#[derive(Clone)]
pub struct OpContext {
    pub daemon: Daemon,
    pub notifications: Arc<dyn NotificationSink>,
    pub navigator: Arc<dyn Navigator>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl OpContext {
    pub fn new(
        daemon: Daemon,
        notifications: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            daemon,
            notifications,
            navigator,
            credentials,
        }
    }
}
