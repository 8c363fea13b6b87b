//! Cart route handlers.
//!
//! Every handler locks the cart widget, runs one operation to completion and
//! answers with the re-rendered widget fragment (for HTMX `outerHTML` swaps).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{AppendHeaders, IntoResponse, Response},
};
use coffee_shop_core::{LineItem, Price};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;
use crate::widgets::CartView;

/// Add to cart form data, as posted by a product's "Add to Cart" control.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl AddToCartForm {
    fn into_line_item(self) -> LineItem {
        LineItem {
            image: self.image.filter(|image| !image.is_empty()),
            ..LineItem::new(self.name, Price::parse_label(&self.price))
        }
    }
}

/// Cart widget fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_widget.html")]
pub struct CartWidgetTemplate {
    pub cart: CartView,
}

/// Add item to cart (HTMX).
///
/// Opens the panel if it was closed and triggers a notification refresh.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Response> {
    add_breadcrumb("cart", "Added item to cart", Some(&[("name", form.name.as_str())]));

    let cart = state.cart().await.add_item(form.into_line_item())?;

    Ok((
        AppendHeaders([("HX-Trigger", "notify")]),
        CartWidgetTemplate { cart },
    )
        .into_response())
}

/// Increase the quantity of a cart line by one (HTMX).
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<CartWidgetTemplate> {
    let cart = state.cart().await.update_quantity(index, 1)?;
    Ok(CartWidgetTemplate { cart })
}

/// Decrease the quantity of a cart line by one, removing it at zero (HTMX).
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<CartWidgetTemplate> {
    let cart = state.cart().await.update_quantity(index, -1)?;
    Ok(CartWidgetTemplate { cart })
}

/// Remove a cart line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<CartWidgetTemplate> {
    let cart = state.cart().await.remove_item(index)?;
    Ok(CartWidgetTemplate { cart })
}

/// Open or close the cart panel (HTMX).
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await.toggle_panel();
    CartWidgetTemplate { cart }
}

/// Current cart widget (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await.render();
    CartWidgetTemplate { cart }
}
