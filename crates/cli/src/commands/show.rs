//! Read-only views of the persisted widgets.

use std::sync::Arc;

use coffee_shop_storefront::storage::Storage;
use coffee_shop_storefront::widgets::{CartManager, LineItemView, OrdersManager, SilentNotifier};

/// Print the cart lines, item count and total.
pub fn cart(storage: Arc<dyn Storage>) {
    let view = CartManager::new(storage, Arc::new(SilentNotifier)).initialize();

    if view.is_empty() {
        tracing::info!("{}", view.empty_message());
    }
    print_lines(&view.items);
    tracing::info!("Items: {}", view.item_count);
    tracing::info!("Total : {}", view.total);
}

/// Print the order lines and total.
pub fn orders(storage: Arc<dyn Storage>) {
    let view = OrdersManager::new(storage, Arc::new(SilentNotifier)).initialize();

    if view.is_empty() {
        tracing::info!("{}", view.empty_message());
    }
    print_lines(&view.items);
    tracing::info!("Total: {}", view.total);
}

fn print_lines(items: &[LineItemView]) {
    for item in items {
        tracing::info!(
            index = item.index,
            "{} x{} @ {}",
            item.name,
            item.quantity,
            item.unit_price
        );
    }
}
