// Daemon API helpers
//
// URL construction for daemon actions, classification of failed requests,
// and the diagnostic dump used when a failure cannot be turned into a notice.

mod diagnostics;
mod failure;
mod url;

pub use diagnostics::log_transport_failure;
pub use failure::{
    classify, Classification, ErrorResponse, FailureReason, OutboundRequest, RequestConfig,
    RequestError, ResponseBody, ResponseCode,
};
pub use url::{join_url, ApiRoot, Environment, DEFAULT_API_PREFIX, DEFAULT_PORT};
