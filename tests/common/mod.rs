//! Shared utilities for the integration suites.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

use edge_gateway::{GatewayConfig, GatewayServer};

/// A recording upstream stub.
///
/// Echoes request details as JSON on any path, with a few special
/// endpoints (suffix-matched so base-path tests reach them too):
/// - `…/body`: replies with the raw request body
/// - `…/teapot`: replies 418 with a marker header
/// - `…/framed`: replies with its own `X-Frame-Options`
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    /// Base URL to point a gateway at.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of requests that reached this upstream.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a recording upstream stub on an ephemeral port.
pub async fn start_mock_upstream() -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new().fallback(echo).with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream { addr, hits }
}

async fn echo(State(hits): State<Arc<AtomicUsize>>, request: Request) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();

    if path.ends_with("/body") {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        return (
            StatusCode::OK,
            [("content-type", "application/octet-stream")],
            bytes,
        )
            .into_response();
    }
    if path.ends_with("/teapot") {
        return (
            StatusCode::IM_A_TEAPOT,
            [("x-upstream-tag", "brew")],
            "short and stout",
        )
            .into_response();
    }
    if path.ends_with("/framed") {
        return (
            StatusCode::OK,
            [("x-frame-options", "DENY")],
            "framed",
        )
            .into_response();
    }

    let payload = serde_json::json!({
        "method": parts.method.as_str(),
        "path": parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_default(),
        "host": header_str(&parts.headers, "host"),
        "origin": header_str(&parts.headers, "origin"),
        "request_id": header_str(&parts.headers, "x-request-id"),
    });
    axum::Json(payload).into_response()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Gateway configuration pointing at the given upstream, open origin
/// policy, ephemeral port.
pub fn config_for(upstream: &str) -> GatewayConfig {
    GatewayConfig {
        upstream: upstream.parse().unwrap(),
        allowed_origin: None,
        listen_port: 0,
    }
}

/// Spawn a gateway under test; returns its base URL.
pub async fn start_gateway(config: GatewayConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = GatewayServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    format!("http://{addr}")
}

/// An address nothing is listening on (bound once, then released).
#[allow(dead_code)]
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// HTTP client that ignores any proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
