//! Configuration loading from the process environment.

use std::env;

use axum::http::{HeaderValue, Uri};
use thiserror::Error;

use crate::config::schema::{GatewayConfig, DEFAULT_PORT};

/// Variable naming the upstream base URL. Required.
pub const API_VAR: &str = "API";
/// Variable naming the single allowed browser origin. Optional.
pub const ORIGIN_VAR: &str = "ORIGIN";
/// Variable naming the listen port. Optional.
pub const PORT_VAR: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The required upstream target is absent (or empty).
    #[error("API environment variable is not set")]
    MissingUpstream,

    /// The upstream target is not an absolute http or https URL.
    #[error("API is not a valid upstream URL: {0:?}")]
    InvalidUpstream(String),

    /// The allowed origin cannot be carried in a response header.
    #[error("ORIGIN is not a valid origin value: {0:?}")]
    InvalidOrigin(String),

    /// The listen port is not a number in port range.
    #[error("PORT is not a valid port number: {0:?}")]
    InvalidPort(String),
}

/// Load the gateway configuration from the process environment.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    from_vars(|name| env::var(name).ok())
}

/// Build a configuration from an arbitrary variable lookup.
///
/// Split out from [`from_env`] so tests can supply variables without
/// touching process-global state.
pub fn from_vars<F>(lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(API_VAR)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingUpstream)?;
    let upstream: Uri = raw
        .parse()
        .map_err(|_| ConfigError::InvalidUpstream(raw.clone()))?;
    let absolute = matches!(upstream.scheme_str(), Some("http") | Some("https"))
        && upstream.authority().is_some();
    if !absolute {
        return Err(ConfigError::InvalidUpstream(raw));
    }

    let allowed_origin = match lookup(ORIGIN_VAR).filter(|v| !v.is_empty()) {
        Some(origin) => Some(
            HeaderValue::from_str(&origin)
                .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?,
        ),
        None => None,
    };

    let listen_port = match lookup(PORT_VAR).filter(|v| !v.is_empty()) {
        Some(port) => port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port.clone()))?,
        None => DEFAULT_PORT,
    };

    Ok(GatewayConfig {
        upstream,
        allowed_origin,
        listen_port,
    })
}
