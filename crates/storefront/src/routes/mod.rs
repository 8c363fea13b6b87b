//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Shop page (page load for both widgets)
//! GET  /health                        - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                          - Cart widget
//! POST /cart/add                      - Add product (opens panel, triggers notify)
//! POST /cart/toggle                   - Open/close panel
//! POST /cart/items/{index}/increment  - Quantity + 1
//! POST /cart/items/{index}/decrement  - Quantity - 1 (removes at zero)
//! POST /cart/items/{index}/remove     - Remove line
//!
//! # Orders (HTMX fragments)
//! GET  /orders                        - Orders widget
//! POST /orders/add                    - Add menu item (triggers notify)
//! POST /orders/toggle                 - Open/close panel
//! POST /orders/items/{index}/increment
//! POST /orders/items/{index}/decrement
//! POST /orders/items/{index}/remove
//! POST /orders/checkout               - Confirm total and clear
//!
//! # Notifications
//! GET  /notifications                 - Notification board (polled)
//! ```

pub mod cart;
pub mod home;
pub mod notifications;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/toggle", post(cart::toggle))
        .route("/items/{index}/increment", post(cart::increment))
        .route("/items/{index}/decrement", post(cart::decrement))
        .route("/items/{index}/remove", post(cart::remove))
}

/// Create the orders routes router.
pub fn orders_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::show))
        .route("/add", post(orders::add))
        .route("/toggle", post(orders::toggle))
        .route("/checkout", post(orders::checkout))
        .route("/items/{index}/increment", post(orders::increment))
        .route("/items/{index}/decrement", post(orders::decrement))
        .route("/items/{index}/remove", post(orders::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Shop page
        .route("/", get(home::home))
        .route("/health", get(health))
        // Widgets
        .nest("/cart", cart_routes())
        .nest("/orders", orders_routes())
        .route("/notifications", get(notifications::board))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
