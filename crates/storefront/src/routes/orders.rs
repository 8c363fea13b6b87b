//! Orders route handlers.
//!
//! Mirrors the cart handlers, plus checkout which answers with the emptied
//! widget and the order confirmation.

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
use crate::widgets::OrdersView;

/// Add to order form data, as posted by a menu entry's "Add to Order" control.
#[derive(Debug, Deserialize)]
pub struct AddToOrderForm {
    pub name: String,
    pub price: String,
}

/// Orders widget fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/orders_widget.html")]
pub struct OrdersWidgetTemplate {
    pub orders: OrdersView,
    pub confirmation: Option<String>,
}

impl From<OrdersView> for OrdersWidgetTemplate {
    fn from(orders: OrdersView) -> Self {
        Self {
            orders,
            confirmation: None,
        }
    }
}

/// Add a menu item to the order (HTMX).
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToOrderForm>) -> Result<Response> {
    add_breadcrumb("orders", "Added item to order", Some(&[("name", form.name.as_str())]));

    let item = LineItem::new(form.name, Price::parse_label(&form.price));
    let orders = state.orders().await.add_item(item)?;

    Ok((
        AppendHeaders([("HX-Trigger", "notify")]),
        OrdersWidgetTemplate::from(orders),
    )
        .into_response())
}

/// Increase the quantity of an order line by one (HTMX).
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<OrdersWidgetTemplate> {
    let orders = state.orders().await.update_quantity(index, 1)?;
    Ok(orders.into())
}

/// Decrease the quantity of an order line by one, removing it at zero (HTMX).
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<OrdersWidgetTemplate> {
    let orders = state.orders().await.update_quantity(index, -1)?;
    Ok(orders.into())
}

/// Remove an order line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<OrdersWidgetTemplate> {
    let orders = state.orders().await.remove_item(index)?;
    Ok(orders.into())
}

/// Open or close the orders panel (HTMX).
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.orders().await.toggle_panel();
    OrdersWidgetTemplate::from(orders)
}

/// Current orders widget (HTMX).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let orders = state.orders().await.render();
    OrdersWidgetTemplate::from(orders)
}

/// Confirm and clear the order (HTMX).
///
/// An empty order renders unchanged with no confirmation.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<OrdersWidgetTemplate> {
    let mut orders = state.orders().await;
    let receipt = orders.checkout()?;
    let view = orders.render();
    drop(orders);

    if let Some(receipt) = &receipt {
        add_breadcrumb(
            "orders",
            "Checked out",
            Some(&[("total", receipt.total.to_string().as_str())]),
        );
    }

    Ok(OrdersWidgetTemplate {
        orders: view,
        confirmation: receipt.map(|r| r.confirmation()),
    })
}
