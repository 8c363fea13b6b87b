//! Menu orders widget.
//!
//! Same lifecycle as the cart, with two differences: entries are merged by
//! name alone, and [`OrdersManager::checkout`] confirms the total and empties
//! the list.

use std::sync::Arc;

use coffee_shop_core::{ByName, LineItem, LineItemList, PanelState, Price};

use super::WidgetError;
use super::notification::{Notification, Notifier};
use super::view::OrdersView;
use crate::storage::{ORDERS_KEY, Storage, load_line_items, save_line_items};

/// Result of a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutReceipt {
    pub total: Price,
    pub item_count: u64,
}

impl CheckoutReceipt {
    /// Confirmation text shown to the customer.
    #[must_use]
    pub fn confirmation(&self) -> String {
        format!("Order confirmed! Total: {}", self.total)
    }
}

/// Owns the orders list, its side panel and its persistence key.
pub struct OrdersManager {
    items: LineItemList<ByName>,
    panel: PanelState,
    mounted: bool,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl OrdersManager {
    /// Create an unmounted orders widget with an empty list.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            items: LineItemList::new(),
            panel: PanelState::Closed,
            mounted: false,
            storage,
            notifier,
        }
    }

    /// Page-load entry point: hydrate, mount once, close the panel, render.
    pub fn initialize(&mut self) -> OrdersView {
        self.items =
            LineItemList::from_entries(load_line_items(self.storage.as_ref(), ORDERS_KEY));
        if !self.mounted {
            self.mounted = true;
            tracing::info!(entries = self.items.len(), "Orders widget mounted");
        }
        self.panel = PanelState::Closed;
        self.render()
    }

    /// Add one unit of a menu item. The panel is left as it is.
    ///
    /// # Errors
    ///
    /// Returns an error if the orders list cannot be persisted.
    pub fn add_item(&mut self, item: LineItem) -> Result<OrdersView, WidgetError> {
        let name = item.name.clone();
        let index = self.items.add(item);
        self.persist()?;
        tracing::debug!(name = %name, index, "Added item to orders");

        self.notifier.notify(Notification::added_to_order(&name));
        Ok(self.render())
    }

    /// Remove the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the list cannot be
    /// persisted.
    pub fn remove_item(&mut self, index: usize) -> Result<OrdersView, WidgetError> {
        let removed = self.items.remove_at(index)?;
        self.persist()?;
        tracing::debug!(name = %removed.name, index, "Removed item from orders");
        Ok(self.render())
    }

    /// Change the quantity of the entry at `index` by `delta`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the list cannot be
    /// persisted.
    pub fn update_quantity(
        &mut self,
        index: usize,
        delta: i32,
    ) -> Result<OrdersView, WidgetError> {
        let outcome = self.items.adjust_quantity(index, delta)?;
        self.persist()?;
        tracing::debug!(index, delta, ?outcome, "Updated order quantity");
        Ok(self.render())
    }

    /// Confirm and clear the order.
    ///
    /// Returns `None` without touching anything when the list is empty.
    /// Otherwise the total is captured, the empty list is persisted, and only
    /// then is the in-memory list cleared and the panel closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty list cannot be persisted. The list and
    /// panel are left unchanged in that case.
    pub fn checkout(&mut self) -> Result<Option<CheckoutReceipt>, WidgetError> {
        if self.items.is_empty() {
            return Ok(None);
        }

        let receipt = CheckoutReceipt {
            total: self.items.total_price(),
            item_count: self.items.total_quantity(),
        };
        // Storage is cleared first; a failed write leaves the order intact.
        save_line_items(self.storage.as_ref(), ORDERS_KEY, &[])?;
        self.items.clear();
        self.panel = PanelState::Closed;

        tracing::info!(
            total = %receipt.total,
            items = receipt.item_count,
            "Order checked out"
        );
        Ok(Some(receipt))
    }

    /// Flip the side panel and backdrop.
    pub fn toggle_panel(&mut self) -> OrdersView {
        self.panel.toggle();
        self.render()
    }

    /// Project the current state.
    #[must_use]
    pub fn render(&self) -> OrdersView {
        OrdersView::project(&self.items, self.panel)
    }

    /// Current orders list.
    #[must_use]
    pub const fn items(&self) -> &LineItemList<ByName> {
        &self.items
    }

    /// Current panel state.
    #[must_use]
    pub const fn panel(&self) -> PanelState {
        self.panel
    }

    /// Whether [`initialize`](Self::initialize) has run.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn persist(&self) -> Result<(), WidgetError> {
        save_line_items(self.storage.as_ref(), ORDERS_KEY, self.items.entries())?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};
    use crate::widgets::NotificationKind;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Notification>>);

    impl Notifier for Recorder {
        fn notify(&self, notification: Notification) {
            self.0.lock().unwrap().push(notification);
        }
    }

    fn item(name: &str, price: f64) -> LineItem {
        LineItem::new(name, Price::new(price))
    }

    fn manager() -> (OrdersManager, Arc<MemoryStorage>, Arc<Recorder>) {
        let storage = Arc::new(MemoryStorage::new());
        let recorder = Arc::new(Recorder::default());
        let mut orders = OrdersManager::new(storage.clone(), recorder.clone());
        orders.initialize();
        (orders, storage, recorder)
    }

    #[test]
    fn test_merges_by_name() {
        let (mut orders, _, _) = manager();
        orders.add_item(item("Latte", 4.5)).unwrap();
        let view = orders.add_item(item("Latte", 4.75)).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.total, "$9.00");
    }

    #[test]
    fn test_add_does_not_open_panel() {
        let (mut orders, _, recorder) = manager();
        let view = orders.add_item(item("Latte", 4.5)).unwrap();
        assert_eq!(view.panel, PanelState::Closed);

        let sent = recorder.0.lock().unwrap();
        assert_eq!(sent[0].kind, NotificationKind::Order);
        assert_eq!(sent[0].message, "Latte");
    }

    #[test]
    fn test_checkout_reports_total_and_clears() {
        let (mut orders, storage, _) = manager();
        orders.add_item(item("Latte", 4.5)).unwrap();
        orders.add_item(item("Latte", 4.5)).unwrap();
        orders.add_item(item("Croissant", 3.25)).unwrap();
        orders.toggle_panel();
        let expected = orders.items().total_price();

        let receipt = orders.checkout().unwrap().unwrap();
        assert_eq!(receipt.total, expected);
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.confirmation(), "Order confirmed! Total: $12.25");

        assert!(orders.items().is_empty());
        assert_eq!(orders.panel(), PanelState::Closed);
        assert!(load_line_items(storage.as_ref(), ORDERS_KEY).is_empty());
        assert_eq!(storage.get_item(ORDERS_KEY).unwrap().as_deref(), Some("[]"));
    }

    struct ReadOnlyStorage(MemoryStorage);

    impl Storage for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    #[test]
    fn test_checkout_write_failure_keeps_order() {
        let seeded = MemoryStorage::new();
        save_line_items(&seeded, ORDERS_KEY, &[item("Latte", 4.5)]).unwrap();
        let storage = Arc::new(ReadOnlyStorage(seeded));
        let mut orders = OrdersManager::new(storage.clone(), Arc::new(Recorder::default()));
        orders.initialize();
        orders.toggle_panel();

        assert!(orders.checkout().is_err());
        assert_eq!(orders.items().len(), 1);
        assert_eq!(orders.panel(), PanelState::Open);
        assert_eq!(load_line_items(storage.as_ref(), ORDERS_KEY).len(), 1);
    }

    #[test]
    fn test_checkout_empty_is_noop() {
        let (mut orders, storage, _) = manager();
        orders.toggle_panel();
        assert_eq!(orders.checkout().unwrap(), None);
        assert_eq!(orders.panel(), PanelState::Open);
        assert_eq!(storage.get_item(ORDERS_KEY).unwrap(), None);
    }

    #[test]
    fn test_decrement_and_remove() {
        let (mut orders, _, _) = manager();
        orders.add_item(item("Latte", 4.5)).unwrap();
        orders.add_item(item("Mocha", 5.0)).unwrap();
        orders.update_quantity(1, 1).unwrap();
        let view = orders.update_quantity(0, -1).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].name, "Mocha");
        assert_eq!(view.items[0].quantity, 2);

        let view = orders.remove_item(0).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_initialize_hydrates_persisted_orders() {
        let (mut orders, storage, _) = manager();
        orders.add_item(item("Latte", 4.5)).unwrap();

        let mut reloaded = OrdersManager::new(storage, Arc::new(Recorder::default()));
        let view = reloaded.initialize();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.item_count, 1);
    }
}
