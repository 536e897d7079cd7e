//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{OrderRepository, ProductRepository, UserRepository};
use crate::services::uploads::UploadService;
use crate::store::DocumentStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The repositories are constructed once here
/// so each collection has exactly one write lock for the whole process.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    users: UserRepository,
    products: ProductRepository,
    orders: OrderRepository,
    uploads: UploadService,
}

impl AppState {
    /// Create the application state over the given store.
    #[must_use]
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        let uploads = UploadService::new(config.uploads_dir.clone(), config.max_upload_bytes);

        Self {
            inner: Arc::new(AppStateInner {
                users: UserRepository::new(Arc::clone(&store)),
                products: ProductRepository::new(Arc::clone(&store)),
                orders: OrderRepository::new(store),
                uploads,
                config,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get the account repository.
    #[must_use]
    pub fn users(&self) -> &UserRepository {
        &self.inner.users
    }

    /// Get the catalog repository.
    #[must_use]
    pub fn products(&self) -> &ProductRepository {
        &self.inner.products
    }

    /// Get the order repository.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    /// Get the image upload service.
    #[must_use]
    pub fn uploads(&self) -> &UploadService {
        &self.inner.uploads
    }
}
