//! Orders list mutations.

use std::sync::Arc;

use coffee_shop_core::{LineItem, Price};
use coffee_shop_storefront::storage::Storage;
use coffee_shop_storefront::widgets::{OrdersManager, SilentNotifier, WidgetError};

/// Add one unit of `name` at the parsed `price` label.
///
/// # Errors
///
/// Returns an error if the updated list cannot be persisted.
pub fn add(storage: Arc<dyn Storage>, name: &str, price: &str) -> Result<(), WidgetError> {
    let mut orders = OrdersManager::new(storage, Arc::new(SilentNotifier));
    orders.initialize();

    let view = orders.add_item(LineItem::new(name, Price::parse_label(price)))?;

    tracing::info!("Added {name} to the order");
    tracing::info!("Total: {}", view.total);
    Ok(())
}

/// Confirm the orders list and clear it.
///
/// # Errors
///
/// Returns an error if the cleared list cannot be persisted.
pub fn checkout(storage: Arc<dyn Storage>) -> Result<(), WidgetError> {
    let mut orders = OrdersManager::new(storage, Arc::new(SilentNotifier));
    orders.initialize();

    match orders.checkout()? {
        Some(receipt) => {
            tracing::info!("{}", receipt.confirmation());
            tracing::info!("Items: {}", receipt.item_count);
        }
        None => tracing::info!("Nothing to check out"),
    }
    Ok(())
}
