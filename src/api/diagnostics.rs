// Diagnostic dump for failed requests
//
// Operator-facing: writes whatever the error carries to the tracing error
// channel. Independent of the notification path, and never fails.

use tracing::error;

use super::failure::RequestError;

/// Log a failed request, reporting the fields that match how far it got
pub fn log_transport_failure(err: &RequestError) {
    error!("An HTTP request failed. More information to follow.");

    if let Some(response) = err.response() {
        error!(
            status = response.status,
            headers = ?response.headers,
            body = %response.body,
            "Request succeeded, but response was in error range (4xx-5xx)"
        );
    } else if let Some(request) = err.request() {
        error!(
            method = %request.method,
            url = %request.url,
            "Request was made, but no response was received"
        );
    } else {
        error!(error = %err, "A generic error occurred, request could not be constructed");
    }

    error!(backtrace = %err.backtrace(), "Stack trace");
    match err.config() {
        Some(config) => error!(
            method = %config.method,
            url = %config.url,
            body = ?config.body,
            "Request configuration"
        ),
        None => error!("Request configuration: none"),
    }
}
