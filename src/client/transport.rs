// Transport trait for daemon actions

use async_trait::async_trait;

use crate::api::{RequestError, ResponseBody};
use crate::daemon::{DaemonOp, ShutdownOptions};

/// Successful (2xx) reply to a daemon action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Issues daemon actions against the API
///
/// Implementors only provide `send`; the per-operation methods are thin
/// wrappers over it.
#[async_trait]
pub trait DaemonTransport: Send + Sync {
    /// POST `op` for the daemon with hardware address `mac`.
    ///
    /// Options are sent as the JSON body for every operation except
    /// `restart`, which never carries a body.
    async fn send(
        &self,
        op: DaemonOp,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError>;

    async fn boot(
        &self,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError> {
        self.send(DaemonOp::Boot, mac, options).await
    }

    async fn logout(
        &self,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError> {
        self.send(DaemonOp::Logout, mac, options).await
    }

    async fn reboot(
        &self,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError> {
        self.send(DaemonOp::Reboot, mac, options).await
    }

    async fn shutdown(
        &self,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError> {
        self.send(DaemonOp::Shutdown, mac, options).await
    }

    async fn restart(&self, mac: &str) -> Result<ActionResponse, RequestError> {
        self.send(DaemonOp::Restart, mac, None).await
    }
}
