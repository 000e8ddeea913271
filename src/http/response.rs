//! Response handling for failures.
//!
//! # Responsibilities
//! - Build the one generic reply every caught failure collapses into
//! - Convert handler panics into that same reply
//!
//! # Design Decisions
//! - The reply is fixed: 500, plain text, no internal detail; operators
//!   get the cause from the log, callers never do
//! - Panics are caught at a middleware boundary so a poisoned request
//!   cannot take the connection down

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Body of the generic failure reply.
pub const FAILURE_BODY: &str = "Something broke!";

/// The fixed reply for any failure caught during request handling.
pub fn internal_error_response() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY).into_response()
}

/// Panic boundary for the request pipeline: record the payload, reply
/// with the generic failure response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = detail, "Request handling panicked");

    internal_error_response()
}
