//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (API / ORIGIN / PORT)
//!     → loader.rs (read & validate)
//!     → GatewayConfig (typed, immutable)
//!     → passed by value into the server at startup
//! ```
//!
//! # Design Decisions
//! - Config is read exactly once at startup; request handling never
//!   consults the environment
//! - A missing or malformed required value fails the process before it
//!   listens
//! - An empty variable counts as unset

pub mod loader;
pub mod schema;

pub use loader::{from_env, from_vars, ConfigError};
pub use schema::GatewayConfig;
