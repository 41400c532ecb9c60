//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::api::CatalogClient;
use crate::config::StorefrontConfig;
use crate::controller::StoreController;
use crate::storage::{LocalStorage, LocalStorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The single
/// [`StoreController`] sits behind an async mutex, so UI events are applied
/// one at a time in arrival order.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    controller: Arc<Mutex<StoreController>>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens local storage at the configured path and restores any stored
    /// session user. The catalog is not fetched here.
    ///
    /// # Errors
    ///
    /// Returns an error if the local storage file exists but is unreadable.
    pub fn new(config: StorefrontConfig) -> Result<Self, LocalStorageError> {
        let storage = LocalStorage::open(&config.local_storage_path)?;
        let client = CatalogClient::new(&config.api);
        Ok(Self::with_controller(
            config,
            StoreController::new(client, storage),
        ))
    }

    /// Create application state around an existing controller.
    #[must_use]
    pub fn with_controller(config: StorefrontConfig, controller: StoreController) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                controller: Arc::new(Mutex::new(controller)),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the store controller.
    #[must_use]
    pub fn controller(&self) -> &Mutex<StoreController> {
        &self.inner.controller
    }

    /// Lock the controller with a guard that is not tied to `self`.
    pub async fn lock_controller(&self) -> OwnedMutexGuard<StoreController> {
        Arc::clone(&self.inner.controller).lock_owned().await
    }
}
