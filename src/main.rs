//! Edge Gateway
//!
//! A reverse-proxy gateway built with Tokio and Axum that fronts a single
//! backend API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  EDGE GATEWAY                     │
//!                    │                                                   │
//!     Client Request │  ┌───────┐   ┌────────────┐   ┌──────────────┐   │
//!     ───────────────┼─▶│ http  │──▶│  security  │──▶│    proxy     │───┼──▶ Upstream
//!                    │  │server │   │headers+CORS│   │  forwarder   │   │    API
//!                    │  └───────┘   └────────────┘   └──────┬───────┘   │
//!                    │                                      │           │
//!     Client Response│  ┌──────────────────────┐            │           │
//!     ◀──────────────┼──│ response (hardening  │◀───────────┘           │
//!                    │  │ headers, 500 boundary)│                        │
//!                    │  └──────────────────────┘                        │
//!                    │                                                   │
//!                    │  ┌─────────────────────────────────────────────┐ │
//!                    │  │   config (API / ORIGIN / PORT, read once)    │ │
//!                    │  └─────────────────────────────────────────────┘ │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! Requests under `/api` are forwarded to the configured upstream; every
//! other path gets a 404. All responses, error paths included, carry the
//! fixed hardening header set.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_gateway::config::{self, ConfigError};
use edge_gateway::http::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edge_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("edge-gateway v0.1.0 starting");

    // Load configuration from the environment; a bad configuration must
    // fail the process before it ever listens
    let config = config::from_env().unwrap_or_else(|err| fail_startup(err));

    tracing::info!(
        upstream = %config.upstream,
        allowed_origin = ?config.allowed_origin,
        port = config.listen_port,
        "Configuration loaded"
    );

    let bind_address = config.bind_address();
    let server = GatewayServer::new(config).unwrap_or_else(|err| fail_startup(err));

    // Bind TCP listener
    let listener = TcpListener::bind(bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Log a startup-fatal configuration error and exit non-zero.
fn fail_startup(err: ConfigError) -> ! {
    tracing::error!(error = %err, "Invalid configuration");
    std::process::exit(1);
}
