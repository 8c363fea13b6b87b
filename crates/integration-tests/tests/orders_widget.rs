//! Orders widget and checkout scenarios against file-backed storage.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use coffee_shop_core::{LineItem, PanelState, Price};
use coffee_shop_integration_tests::TestContext;
use coffee_shop_storefront::storage::{ORDERS_KEY, Storage};
use coffee_shop_storefront::widgets::{OrdersManager, SilentNotifier};

fn mounted(storage: Arc<dyn Storage>) -> OrdersManager {
    let mut orders = OrdersManager::new(storage, Arc::new(SilentNotifier));
    orders.initialize();
    orders
}

#[test]
fn test_orders_merge_by_name() {
    let ctx = TestContext::new();
    let mut orders = mounted(ctx.storage());

    orders
        .add_item(LineItem::new("Latte", Price::new(4.5)))
        .unwrap();
    let view = orders
        .add_item(LineItem::new("Latte", Price::new(5.0)))
        .unwrap();

    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].quantity, 2);
    // The first price sticks.
    assert_eq!(view.items[0].unit_price, "$4.50");
    assert_eq!(view.total, "$9.00");
}

#[test]
fn test_checkout_clears_and_persists() {
    let ctx = TestContext::new();
    let mut orders = mounted(ctx.storage());

    orders
        .add_item(LineItem::new("Latte", Price::new(4.5)))
        .unwrap();
    orders
        .add_item(LineItem::new("Mocha", Price::new(5.0)))
        .unwrap();
    orders.toggle_panel();

    let receipt = orders.checkout().unwrap().unwrap();
    assert_eq!(receipt.confirmation(), "Order confirmed! Total: $9.50");
    assert_eq!(receipt.item_count, 2);

    let view = orders.render();
    assert!(view.is_empty());
    assert_eq!(view.empty_message(), "No orders yet");
    assert_eq!(view.panel, PanelState::Closed);
    assert_eq!(
        ctx.storage().get_item(ORDERS_KEY).unwrap().as_deref(),
        Some("[]")
    );
}

#[test]
fn test_checkout_empty_is_noop() {
    let ctx = TestContext::new();
    let mut orders = mounted(ctx.storage());

    assert!(orders.checkout().unwrap().is_none());
    assert!(ctx.storage().get_item(ORDERS_KEY).unwrap().is_none());
}

#[test]
fn test_orders_survive_reload() {
    let ctx = TestContext::new();
    {
        let mut orders = mounted(ctx.storage());
        orders
            .add_item(LineItem::new("Mocha", Price::new(5.0)))
            .unwrap();
        orders.update_quantity(0, 2).unwrap();
    }

    let view = OrdersManager::new(ctx.storage(), Arc::new(SilentNotifier)).initialize();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.item_count, 3);
    assert_eq!(view.total, "$15.00");
}

#[test]
fn test_cart_and_orders_keys_are_independent() {
    let ctx = TestContext::new();
    let mut orders = mounted(ctx.storage());
    orders
        .add_item(LineItem::new("Latte", Price::new(4.5)))
        .unwrap();

    let cart = coffee_shop_storefront::widgets::CartManager::new(
        ctx.storage(),
        Arc::new(SilentNotifier),
    )
    .initialize();
    assert!(cart.is_empty());
}
