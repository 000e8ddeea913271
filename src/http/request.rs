//! Request identity.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) before any handling
//! - Expose the header name the rest of the pipeline reads it from
//!
//! # Design Decisions
//! - The ID is attached as early as possible so every log line and the
//!   forwarded upstream request carry it
//! - A caller-supplied ID is kept, so correlation survives proxy chains

use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the per-request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Issues a fresh UUID v4 for each request.
///
/// Plugged into `SetRequestIdLayer` at the top of the middleware chain.
#[derive(Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}
