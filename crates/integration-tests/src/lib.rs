//! Integration tests for Paper Cart.
//!
//! Each test spawns the real server on an ephemeral port with a fresh
//! temporary data directory and drives it over HTTP with `reqwest`, so the
//! whole stack (router, adapters, repositories, file store, locking) is
//! exercised exactly as deployed. The demo-catalog seed is not run: every
//! test starts from empty collections.
//!
//! Run with: `cargo test -p paper-cart-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use serde_json::Value;

use paper_cart_server::config::ServerConfig;
use paper_cart_server::routes;
use paper_cart_server::state::AppState;
use paper_cart_server::store::FsStore;

/// A running server instance backed by a temporary data directory.
///
/// The directory (and everything the test persisted) is removed on drop.
/// The serve task is aborted when the runtime shuts down at test end.
pub struct TestServer {
    pub client: reqwest::Client,
    pub base_url: String,
    _data_dir: tempfile::TempDir,
}

impl TestServer {
    /// Spawn the app on an ephemeral port.
    pub async fn spawn() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_dir: data_dir.path().join("data"),
            uploads_dir: data_dir.path().join("uploads"),
            max_upload_bytes: 5 * 1024 * 1024,
        };

        let store = Arc::new(FsStore::new(config.data_dir.clone()));
        let state = AppState::new(config, store);
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            _data_dir: data_dir,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// POST a JSON body, returning status and decoded response body.
    pub async fn post_json(&self, path: &str, body: &Value) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send request");
        Self::decode(resp).await
    }

    /// GET a path, returning status and decoded response body.
    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        Self::decode(resp).await
    }

    /// DELETE a path, returning status and decoded response body.
    pub async fn delete_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        Self::decode(resp).await
    }

    async fn decode(resp: reqwest::Response) -> (reqwest::StatusCode, Value) {
        let status = resp.status();
        let body = resp.json().await.unwrap_or(Value::Null);
        (status, body)
    }
}
