//! Forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! admitted /api request
//!     → forwarder.rs (URI rewrite, Host/Origin rewrite, hop-by-hop hygiene)
//!     → upstream (one attempt, bodies streamed both ways)
//!     → relay to caller
//!        └─ on failure: error.rs → generic 500 reply
//! ```
//!
//! # Design Decisions
//! - One upstream, fixed at startup; no routing table, no balancing
//! - Exactly one outbound attempt per inbound request; no retries
//! - No gateway-imposed timeout; transport defaults govern

pub mod error;
pub mod forwarder;

pub use error::ForwardError;
pub use forwarder::Forwarder;
