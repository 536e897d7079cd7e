//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PAPER_CART_HOST` - Bind address (default: 127.0.0.1)
//! - `PAPER_CART_PORT` - Listen port (default: 2000)
//! - `PAPER_CART_DATA_DIR` - Directory holding the JSON collections (default: data)
//! - `PAPER_CART_UPLOADS_DIR` - Directory for uploaded images (default: public/uploads)
//! - `PAPER_CART_MAX_UPLOAD_BYTES` - Upload size cap (default: 5 MiB)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 2000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the persisted JSON collections
    pub data_dir: PathBuf,
    /// Directory uploaded product images are written to
    pub uploads_dir: PathBuf,
    /// Maximum accepted size for an uploaded image, in bytes
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_host(std::env::var("PAPER_CART_HOST").ok())?;
        let port = parse_port(std::env::var("PAPER_CART_PORT").ok())?;
        let max_upload_bytes =
            parse_max_upload_bytes(std::env::var("PAPER_CART_MAX_UPLOAD_BYTES").ok())?;

        let data_dir = std::env::var("PAPER_CART_DATA_DIR")
            .map_or_else(|_| PathBuf::from("data"), PathBuf::from);
        let uploads_dir = std::env::var("PAPER_CART_UPLOADS_DIR")
            .map_or_else(|_| PathBuf::from("public/uploads"), PathBuf::from);

        Ok(Self {
            host,
            port,
            data_dir,
            uploads_dir,
            max_upload_bytes,
        })
    }

    /// The socket address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_host(raw: Option<String>) -> Result<IpAddr, ConfigError> {
    match raw {
        None => Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)),
        Some(value) => value.parse().map_err(|_| {
            ConfigError::InvalidEnvVar("PAPER_CART_HOST".to_owned(), value)
        }),
    }
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value.parse().map_err(|_| {
            ConfigError::InvalidEnvVar("PAPER_CART_PORT".to_owned(), value)
        }),
    }
}

fn parse_max_upload_bytes(raw: Option<String>) -> Result<usize, ConfigError> {
    match raw {
        None => Ok(DEFAULT_MAX_UPLOAD_BYTES),
        Some(value) => value.parse().map_err(|_| {
            ConfigError::InvalidEnvVar("PAPER_CART_MAX_UPLOAD_BYTES".to_owned(), value)
        }),
    }
}
