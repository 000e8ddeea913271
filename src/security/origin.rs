//! Origin allow-list policy.
//!
//! # Responsibilities
//! - Decide whether a declared browser origin is admitted
//! - Emit cross-origin approval headers for admitted origins
//! - Answer preflight requests without involving the forwarder
//!
//! # Design Decisions
//! - Exact string match, scheme and port included; `https://app.example`
//!   and `http://app.example` are different origins
//! - A rejected origin gets no approval header but the request is still
//!   handled; the browser refuses the response on its side
//! - Preflights advertise the fixed method list and mirror the caller's
//!   requested headers

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

/// Methods advertised on preflight responses.
const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Cross-origin admission policy derived from configuration.
#[derive(Debug, Clone)]
pub enum OriginPolicy {
    /// No origin restriction configured: every caller is admitted.
    AllowAny,
    /// Exactly one origin is admitted.
    Exact(HeaderValue),
}

impl OriginPolicy {
    /// Build the policy from the configured allowed origin.
    ///
    /// A literal `*` is the open policy spelled out, not an origin that
    /// only ever equals itself.
    pub fn from_config(allowed_origin: Option<HeaderValue>) -> Self {
        match allowed_origin {
            Some(origin) if origin == "*" => Self::AllowAny,
            Some(origin) => Self::Exact(origin),
            None => Self::AllowAny,
        }
    }

    /// Whether a declared origin is admitted by this policy.
    pub fn permits(&self, origin: &HeaderValue) -> bool {
        match self {
            Self::AllowAny => true,
            Self::Exact(allowed) => origin == allowed,
        }
    }

    /// Materialize the policy as a CORS middleware layer.
    ///
    /// The single-origin case goes through the list form so a mismatched
    /// origin gets no approval header at all, rather than someone else's.
    pub fn into_layer(self) -> CorsLayer {
        let allow_origin = match self {
            Self::AllowAny => AllowOrigin::any(),
            Self::Exact(origin) => AllowOrigin::list([origin]),
        };
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(AllowHeaders::mirror_request())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(value: &'static str) -> HeaderValue {
        HeaderValue::from_static(value)
    }

    #[test]
    fn test_unconfigured_policy_permits_everything() {
        let policy = OriginPolicy::from_config(None);

        assert!(policy.permits(&origin("https://anywhere.example")));
        assert!(policy.permits(&origin("http://localhost:5173")));
    }

    #[test]
    fn test_exact_policy_permits_only_the_configured_origin() {
        let policy = OriginPolicy::from_config(Some(origin("https://allowed.example")));

        assert!(policy.permits(&origin("https://allowed.example")));
        assert!(!policy.permits(&origin("https://other.example")));
    }

    #[test]
    fn test_exact_match_includes_scheme_and_port() {
        let policy = OriginPolicy::from_config(Some(origin("https://allowed.example")));

        assert!(!policy.permits(&origin("http://allowed.example")));
        assert!(!policy.permits(&origin("https://allowed.example:8443")));
    }

    #[test]
    fn test_star_configures_the_open_policy() {
        let policy = OriginPolicy::from_config(Some(origin("*")));

        assert!(matches!(policy, OriginPolicy::AllowAny));
        assert!(policy.permits(&origin("https://anywhere.example")));
    }
}
