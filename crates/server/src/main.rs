//! Paper Cart server - shop HTTP API.
//!
//! This binary serves the shop API on port 2000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON request/response bodies
//! - Flat JSON document collections on disk (`data/` by default)
//! - One write lock per collection around every load-mutate-persist span
//! - Uploaded product images land in `public/uploads` and are served
//!   back under `/uploads`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paper_cart_server::config::ServerConfig;
use paper_cart_server::state::AppState;
use paper_cart_server::store::{DocumentStore, FsStore};
use paper_cart_server::{routes, seed};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "paper_cart_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the collection store and seed the demo catalog on first boot
    let store: Arc<dyn DocumentStore> = Arc::new(FsStore::new(config.data_dir.clone()));
    seed::ensure_demo_catalog(store.as_ref())
        .await
        .expect("Failed to seed demo catalog");

    // Build application state and router
    let state = AppState::new(config.clone(), store);
    let app = routes::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("paper cart listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
