//! Request forwarding to the upstream target.
//!
//! # Responsibilities
//! - Rewrite inbound URIs onto the upstream scheme, authority and base path
//! - Rewrite `Host` (and a declared `Origin`) to the upstream's own
//! - Strip hop-by-hop headers in both directions
//! - Stream request and response bodies without buffering
//!
//! # Design Decisions
//! - The inbound path is forwarded whole, `/api` prefix included, appended
//!   to whatever base path the upstream URL carries
//! - The upstream call is awaited inline, so a caller that disconnects
//!   drops the in-flight call with it
//! - End-to-end headers pass through untouched in both directions

use std::str::FromStr;

use axum::{
    body::Body,
    http::{
        header::{HeaderValue, CONNECTION, HOST, ORIGIN},
        uri::{Authority, PathAndQuery, Scheme},
        HeaderMap, Request, Response, Uri, Version,
    },
};
use hyper::body::Incoming;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::ConfigError;
use crate::proxy::error::ForwardError;

/// Hop-by-hop headers a proxy must not forward (RFC 9110 §7.6.1).
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "proxy-connection",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Forwards requests to the single configured upstream.
pub struct Forwarder {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    scheme: Scheme,
    authority: Authority,
    /// Upstream base path with any trailing slash removed; empty when the
    /// upstream URL has no path.
    base_path: String,
    /// Precomputed `Host` value: the upstream authority verbatim.
    host: HeaderValue,
    /// Precomputed `Origin` replacement: `scheme://authority`.
    origin: HeaderValue,
}

impl Forwarder {
    /// Create a forwarder for the given upstream base URL.
    ///
    /// Fails when the URL lacks the scheme or authority the loader
    /// normally guarantees.
    pub fn new(upstream: &Uri) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidUpstream(upstream.to_string());

        let scheme = upstream.scheme().cloned().ok_or_else(invalid)?;
        let authority = upstream.authority().cloned().ok_or_else(invalid)?;
        let host = HeaderValue::from_str(authority.as_str()).map_err(|_| invalid())?;
        let origin = HeaderValue::from_str(&format!("{scheme}://{authority}"))
            .map_err(|_| invalid())?;
        let base_path = upstream.path().trim_end_matches('/').to_string();

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self {
            client,
            scheme,
            authority,
            base_path,
            host,
            origin,
        })
    }

    /// Forward one request upstream and relay the response.
    ///
    /// Exactly one outbound attempt is made; any failure surfaces as a
    /// [`ForwardError`] for the caller-facing boundary to collapse.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (mut parts, body) = request.into_parts();

        // Rewrite destination
        parts.uri = self
            .upstream_uri(&parts.uri)
            .map_err(ForwardError::UriRewrite)?;
        parts.version = Version::HTTP_11;

        // Header hygiene, then impersonate a direct client of the upstream
        strip_hop_by_hop_headers(&mut parts.headers);
        parts.headers.insert(HOST, self.host.clone());
        if parts.headers.contains_key(ORIGIN) {
            parts.headers.insert(ORIGIN, self.origin.clone());
        }

        let outbound = Request::from_parts(parts, body);
        let response = self
            .client
            .request(outbound)
            .await
            .map_err(ForwardError::Upstream)?;

        Ok(relay(response))
    }

    /// Rewrite an inbound URI onto the upstream target.
    ///
    /// The inbound path rides whole onto the upstream's base path; the
    /// query string comes along unchanged.
    fn upstream_uri(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let suffix = inbound
            .path_and_query()
            .map(PathAndQuery::as_str)
            .unwrap_or("/");
        let path_and_query = if self.base_path.is_empty() {
            PathAndQuery::from_str(suffix)?
        } else {
            PathAndQuery::from_str(&format!("{}{}", self.base_path, suffix))?
        };

        let mut parts = axum::http::uri::Parts::default();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        parts.path_and_query = Some(path_and_query);
        Ok(Uri::from_parts(parts)?)
    }
}

/// Convert an upstream response for relay: hop-by-hop headers dropped,
/// streaming body passed through.
fn relay(response: Response<Incoming>) -> Response<Body> {
    let (mut parts, body) = response.into_parts();
    strip_hop_by_hop_headers(&mut parts.headers);
    Response::from_parts(parts, Body::new(body))
}

/// Remove hop-by-hop headers, including any the `Connection` header names.
fn strip_hop_by_hop_headers(headers: &mut HeaderMap) {
    let connection_named: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    for name in connection_named {
        headers.remove(name.as_str());
    }
    for name in HOP_BY_HOP_HEADERS {
        headers.remove(*name);
    }
}
