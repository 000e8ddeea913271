//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router: the `/api` route family and the 404 fallback
//! - Wire up middleware (tracing, request ID, hardening headers, panic
//!   boundary, origin policy)
//! - Dispatch admitted requests to the forwarder
//! - Serve connections until shutdown
//!
//! # Middleware order (outermost first)
//! ```text
//! trace → request ID → security headers → panic boundary → origin policy → routes
//! ```
//! The hardening header layer sits outside both failure paths, so 404s,
//! 500s and panic replies all carry the full set. The origin policy sits
//! inside it for the same reason: its preflight answers pick the headers
//! up on the way out.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer, request_id::SetRequestIdLayer, trace::TraceLayer,
};

use crate::config::{ConfigError, GatewayConfig};
use crate::http::request::{UuidRequestId, X_REQUEST_ID};
use crate::http::response::handle_panic;
use crate::proxy::{ForwardError, Forwarder};
use crate::security::{security_headers_middleware, OriginPolicy};

/// Path prefix below which requests are forwarded upstream.
pub const FORWARD_PREFIX: &str = "/api";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server from an immutable configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, ConfigError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);
        let state = AppState { forwarder };
        let policy = OriginPolicy::from_config(config.allowed_origin.clone());

        let router = Self::build_router(state, policy);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState, policy: OriginPolicy) -> Router {
        let stack = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(middleware::from_fn(security_headers_middleware))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(policy.into_layer());

        // The prefix matches like a mount point: `/api`, `/api/` and
        // anything below, but never `/apifoo`
        Router::new()
            .route(FORWARD_PREFIX, any(forward_handler))
            .route(&format!("{FORWARD_PREFIX}/"), any(forward_handler))
            .route(&format!("{FORWARD_PREFIX}/{{*rest}}"), any(forward_handler))
            .fallback(not_found)
            .layer(stack)
            .with_state(state)
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream,
            "HTTP server starting"
        );

        // Serve with graceful shutdown
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward an admitted request upstream and relay the result.
///
/// The `?` is the pipeline's single error exit: any rewrite or transport
/// failure becomes the generic 500 reply.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ForwardError> {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        "Forwarding request"
    );

    let response = state.forwarder.forward(request).await?;

    tracing::debug!(
        request_id = %request_id,
        status = %response.status(),
        "Upstream replied"
    );
    Ok(response)
}

/// Fallback for every path outside the forwarded prefix.
async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
