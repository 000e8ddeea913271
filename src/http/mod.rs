//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware chain, serve loop)
//!     → request.rs (request ID before any handling)
//!     → /api* → proxy::Forwarder | any other path → 404
//!     → response.rs (generic 500 when forwarding errs or a handler panics)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::GatewayServer;
