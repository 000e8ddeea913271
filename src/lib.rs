//! Edge Gateway Library
//!
//! A small reverse-proxy gateway: one listener, one upstream, a fixed
//! hardening and origin policy in front of it.

pub mod config;
pub mod http;
pub mod proxy;
pub mod security;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
