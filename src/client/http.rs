// reqwest transport
//
// POSTs daemon actions to `{root}/daemons/{mac}/{op}`. Failures are recorded
// with as much context as the request reached: the configuration always, the
// outbound request once built, the response once one arrives.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, COOKIE};
use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use super::transport::{ActionResponse, DaemonTransport};
use crate::api::{
    ApiRoot, ErrorResponse, OutboundRequest, RequestConfig, RequestError, ResponseBody,
};
use crate::daemon::{DaemonOp, ShutdownOptions};
use crate::session::CredentialStore;

/// HTTP transport for the daemon API
pub struct HttpTransport {
    client: Client,
    root: ApiRoot,
    session: Option<(Arc<dyn CredentialStore>, String)>,
}

impl HttpTransport {
    /// Create a transport for an API root.
    ///
    /// No timeout is configured: a stalled call waits until the
    /// connection itself gives up.
    pub fn new(root: ApiRoot) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            root,
            session: None,
        })
    }

    /// Send the credential stored under `cookie` with every request
    pub fn with_session(mut self, store: Arc<dyn CredentialStore>, cookie: impl Into<String>) -> Self {
        self.session = Some((store, cookie.into()));
        self
    }

    pub fn root(&self) -> &ApiRoot {
        &self.root
    }

    fn session_cookie(&self) -> Option<String> {
        let (store, name) = self.session.as_ref()?;
        store.get(name).map(|value| format!("{}={}", name, value))
    }

    fn build_request(
        &self,
        config: &RequestConfig,
    ) -> Result<reqwest::Request, RequestError> {
        let mut builder = self.client.post(&config.url);
        if let Some(body) = &config.body {
            builder = builder.json(body);
        }
        if let Some(cookie) = self.session_cookie() {
            builder = builder.header(COOKIE, cookie);
        }

        builder.build().map_err(|e| {
            RequestError::new(format!("Failed to construct request: {}", e))
                .with_config(config.clone())
                .with_source(e)
        })
    }
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<non-ascii>");
            (name.to_string(), value.to_string())
        })
        .collect()
}

#[async_trait]
impl DaemonTransport for HttpTransport {
    async fn send(
        &self,
        op: DaemonOp,
        mac: &str,
        options: Option<&ShutdownOptions>,
    ) -> Result<ActionResponse, RequestError> {
        let config = RequestConfig {
            method: "POST".to_string(),
            url: self.root.action_url(mac, op),
            body: options
                .filter(|_| op.accepts_options())
                .map(ShutdownOptions::to_value),
        };

        let request = self.build_request(&config)?;
        let outbound = OutboundRequest {
            method: request.method().to_string(),
            url: request.url().to_string(),
        };

        debug!(url = %outbound.url, op = %op, "Sending daemon action");

        let response = self.client.execute(request).await.map_err(|e| {
            RequestError::new(format!("No response from {}: {}", outbound.url, e))
                .with_request(outbound.clone())
                .with_config(config.clone())
                .with_source(e)
        })?;

        let status = response.status();
        let headers = collect_headers(response.headers());
        // A body that fails to stream is treated as empty; the status still decides
        let body = ResponseBody::from_text(response.text().await.unwrap_or_default());

        debug!(status = status.as_u16(), "Daemon action answered");

        if !status.is_success() {
            let response = ErrorResponse {
                status: status.as_u16(),
                headers,
                body,
            };
            return Err(
                RequestError::new(format!("Request failed with status code {}", status.as_u16()))
                    .with_response(response)
                    .with_request(outbound)
                    .with_config(config),
            );
        }

        Ok(ActionResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Environment;
    use crate::session::{SessionStore, SESSION_COOKIE};

    #[test]
    fn test_transport_creation() {
        let transport = HttpTransport::new(ApiRoot::for_environment(Environment::Development, ""));
        assert!(transport.is_ok());
    }

    #[test]
    fn test_session_cookie_header_value() {
        let store = Arc::new(SessionStore::with_credential(SESSION_COOKIE, "s%3Aabc"));
        let transport = HttpTransport::new(ApiRoot::from_base("http://localhost:3000/api/v1"))
            .unwrap()
            .with_session(store.clone(), SESSION_COOKIE);

        assert_eq!(transport.session_cookie().as_deref(), Some("connect.sid=s%3Aabc"));

        store.clear(SESSION_COOKIE);
        assert_eq!(transport.session_cookie(), None);
    }

    #[test]
    fn test_restart_request_has_no_body() {
        let transport = HttpTransport::new(ApiRoot::from_base("http://localhost:3000/api/v1")).unwrap();
        let config = RequestConfig {
            method: "POST".to_string(),
            url: transport.root().action_url("AA", DaemonOp::Restart),
            body: None,
        };
        let request = transport.build_request(&config).unwrap();
        assert!(request.body().is_none());
        assert_eq!(request.url().path(), "/api/v1/daemons/AA/restart");
    }
}
