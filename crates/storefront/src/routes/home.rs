//! Home page route handler.
//!
//! Serving the page is a page load for both widgets: each one re-hydrates
//! from storage and starts with its panel closed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::listing::{MenuSection, ProductEntry};
use crate::state::AppState;
use crate::widgets::{CartView, OrdersView, Toast};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductEntry>,
    pub menu: Vec<MenuSection>,
    pub cart: CartView,
    pub orders: OrdersView,
    pub confirmation: Option<String>,
    pub toasts: Vec<Toast>,
}

/// Display the shop page with both widgets.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await.initialize();
    let orders = state.orders().await.initialize();

    HomeTemplate {
        products: state.listing().products().to_vec(),
        menu: state.listing().menu().to_vec(),
        cart,
        orders,
        confirmation: None,
        toasts: state.notifications().snapshot(),
    }
}
