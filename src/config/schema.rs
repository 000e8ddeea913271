//! Configuration schema definitions.
//!
//! The gateway is configured entirely through three environment variables,
//! so the schema is a single flat struct built once by the loader.

use axum::http::{HeaderValue, Uri};
use std::net::{Ipv4Addr, SocketAddr};

/// Listen port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

/// Root configuration for the gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream base URL every `/api` request is forwarded to.
    /// Always carries an http or https scheme and an authority.
    pub upstream: Uri,

    /// The single allowed browser origin. `None` permits every origin.
    pub allowed_origin: Option<HeaderValue>,

    /// Port the gateway listens on.
    pub listen_port: u16,
}

impl GatewayConfig {
    /// Socket address the listener binds to (all interfaces).
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.listen_port))
    }
}
