//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → origin.rs (admission decision, preflight answers)
//!     → pass to forwarding
//!
//! Outgoing response (every path, errors included):
//!     → headers.rs (fixed hardening header set)
//!     → send to client
//! ```
//!
//! # Design Decisions
//! - The hardening set is fixed, not configurable
//! - Origin rejection withholds approval headers but never blocks the
//!   request itself; enforcement is the browser's job
//! - No configured origin means every origin is admitted

pub mod headers;
pub mod origin;

pub use headers::{apply_security_headers, security_headers_middleware};
pub use origin::OriginPolicy;
