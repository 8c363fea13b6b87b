//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::config::StorefrontConfig;
use crate::listing::{Listing, ListingError};
use crate::storage::{FileStorage, Storage, StorageError};
use crate::widgets::{CartManager, NotificationCenter, OrdersManager};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("listing error: {0}")]
    Listing(#[from] ListingError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It owns the single cart and
/// orders manager of the page; each sits behind its own mutex, held for the
/// whole of a handler so every action runs mutate, persist and render
/// without interleaving.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    listing: Listing,
    notifications: NotificationCenter,
    cart: Mutex<CartManager>,
    orders: Mutex<OrdersManager>,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// Opens the file store under `config.data_dir` and loads the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or the
    /// listing cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storage = Arc::new(FileStorage::open(&config.data_dir)?);
        let listing = Listing::load(&config.listing_path)?;
        Ok(Self::from_parts(
            config,
            listing,
            storage,
            NotificationCenter::new(),
        ))
    }

    /// Assemble state from already-built parts and mount both widgets.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        listing: Listing,
        storage: Arc<dyn Storage>,
        notifications: NotificationCenter,
    ) -> Self {
        let notifier = Arc::new(notifications.clone());

        let mut cart = CartManager::new(Arc::clone(&storage), notifier.clone());
        cart.initialize();
        let mut orders = OrdersManager::new(storage, notifier);
        orders.initialize();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                listing,
                notifications,
                cart: Mutex::new(cart),
                orders: Mutex::new(orders),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the static product and menu listing.
    #[must_use]
    pub fn listing(&self) -> &Listing {
        &self.inner.listing
    }

    /// Get the notification board.
    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    /// Lock the cart widget.
    pub async fn cart(&self) -> MutexGuard<'_, CartManager> {
        self.inner.cart.lock().await
    }

    /// Lock the orders widget.
    pub async fn orders(&self) -> MutexGuard<'_, OrdersManager> {
        self.inner.orders.lock().await
    }
}
