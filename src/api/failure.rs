// Failed request representation and classification
//
// A RequestError records how far a daemon action got before failing: whether a
// request was built, whether it went out, and whether a response came back.
// classify() turns that shape into a FailureReason and, for error responses,
// one of the recognised ResponseCodes.

use serde_json::Value;
use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Body of a response, parsed as JSON when possible
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResponseBody {
    #[default]
    Empty,
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        if text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }

    /// Top-level field of a JSON object body
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => value.get(name),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Empty => f.write_str("<empty>"),
            ResponseBody::Json(value) => write!(f, "{}", value),
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Response received with a status outside 2xx
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: ResponseBody,
}

impl ErrorResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: ResponseBody::Empty,
        }
    }

    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Request that was sent on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub url: String,
}

/// What the caller asked for, recorded before the request is built
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
}

/// A daemon action that did not complete with a 2xx response
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    response: Option<ErrorResponse>,
    request: Option<OutboundRequest>,
    config: Option<RequestConfig>,
    #[source]
    source: Option<reqwest::Error>,
    trace: Arc<Backtrace>,
}

impl RequestError {
    /// Error with no request, response or configuration attached
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
            request: None,
            config: None,
            source: None,
            trace: Arc::new(Backtrace::force_capture()),
        }
    }

    pub fn with_response(mut self, response: ErrorResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_request(mut self, request: OutboundRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub fn with_config(mut self, config: RequestConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_source(mut self, source: reqwest::Error) -> Self {
        self.source = Some(source);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn response(&self) -> Option<&ErrorResponse> {
        self.response.as_ref()
    }

    pub fn request(&self) -> Option<&OutboundRequest> {
        self.request.as_ref()
    }

    pub fn config(&self) -> Option<&RequestConfig> {
        self.config.as_ref()
    }

    /// Status code of the attached response, if any
    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Backtrace captured where the error was created
    pub fn backtrace(&self) -> &Backtrace {
        &self.trace
    }

    pub fn classify(&self) -> Classification {
        classify(self)
    }
}

/// Structural reason a request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// A response arrived with a status outside 2xx
    ErrorStatus,
    /// The request went out but nothing came back
    NoResponse,
    /// The request could not be constructed
    NotConstructed,
}

/// Error statuses the daemon API documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Unauthorized,
    NotFound,
    TooManyRequests,
    InternalServerError,
    /// 523: the API could not reach the daemon
    OriginUnreachable,
    /// 555: the daemon answered but refused the request
    DaemonError,
}

impl ResponseCode {
    /// Look up a status; undocumented statuses have no code
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(ResponseCode::Unauthorized),
            404 => Some(ResponseCode::NotFound),
            429 => Some(ResponseCode::TooManyRequests),
            500 => Some(ResponseCode::InternalServerError),
            523 => Some(ResponseCode::OriginUnreachable),
            555 => Some(ResponseCode::DaemonError),
            _ => None,
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ResponseCode::Unauthorized => 401,
            ResponseCode::NotFound => 404,
            ResponseCode::TooManyRequests => 429,
            ResponseCode::InternalServerError => 500,
            ResponseCode::OriginUnreachable => 523,
            ResponseCode::DaemonError => 555,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub reason: FailureReason,
    /// Only ever set when `reason` is `ErrorStatus`
    pub code: Option<ResponseCode>,
}

/// Classify a failed request. Checks, in order: attached response,
/// attached outbound request, neither.
pub fn classify(error: &RequestError) -> Classification {
    if let Some(response) = error.response() {
        Classification {
            reason: FailureReason::ErrorStatus,
            code: ResponseCode::from_status(response.status),
        }
    } else if error.request().is_some() {
        Classification {
            reason: FailureReason::NoResponse,
            code: None,
        }
    } else {
        Classification {
            reason: FailureReason::NotConstructed,
            code: None,
        }
    }
}
