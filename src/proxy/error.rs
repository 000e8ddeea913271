//! Forwarding failure taxonomy.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response::internal_error_response;

/// Errors that can occur while forwarding a request upstream.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The upstream call failed at the transport level: unreachable host,
    /// refused or reset connection, malformed response.
    #[error("upstream request failed: {0}")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    /// The inbound request could not be rewritten onto the upstream target.
    #[error("failed to rewrite request uri: {0}")]
    UriRewrite(#[source] axum::http::Error),
}

impl IntoResponse for ForwardError {
    /// The failure boundary: log the real cause, answer with the fixed
    /// generic reply. No internal detail crosses to the caller.
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        internal_error_response()
    }
}
