//! Cart and orders widgets.
//!
//! Each widget is an owned manager object created once at startup. A manager
//! holds its line-item list and panel state, persists the list through a
//! [`Storage`](crate::storage::Storage) key after every mutation, and answers
//! every operation with a freshly projected view.
//!
//! ```text
//! hydrate -> render -> user action -> mutate -> persist -> render
//! ```
//!
//! # Modules
//!
//! - [`cart`] - Product cart (identity: name and price)
//! - [`orders`] - Menu orders with checkout (identity: name)
//! - [`view`] - View projections for the templates
//! - [`notification`] - Timed "item added" toasts

pub mod cart;
pub mod notification;
pub mod orders;
pub mod view;

pub use cart::CartManager;
pub use notification::{
    Notification, NotificationCenter, NotificationKind, Notifier, SilentNotifier, Toast,
    ToastPhase,
};
pub use orders::{CheckoutReceipt, OrdersManager};
pub use view::{CartView, LineItemView, OrdersView};

use coffee_shop_core::LineItemError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by widget operations.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error(transparent)]
    LineItem(#[from] LineItemError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
