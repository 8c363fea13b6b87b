//! Product cart widget.

use std::sync::Arc;

use coffee_shop_core::{ByNameAndPrice, LineItem, LineItemList, PanelState};

use super::WidgetError;
use super::notification::{Notification, Notifier};
use super::view::CartView;
use crate::storage::{CART_KEY, Storage, load_line_items, save_line_items};

/// Owns the cart list, its side panel and its persistence key.
pub struct CartManager {
    items: LineItemList<ByNameAndPrice>,
    panel: PanelState,
    mounted: bool,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
}

impl CartManager {
    /// Create an unmounted cart with an empty list.
    ///
    /// Call [`initialize`](Self::initialize) before use.
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

    /// Page-load entry point.
    ///
    /// Hydrates the list from storage (empty on a missing or unreadable
    /// value), mounts the widget the first time only, resets the panel to
    /// `Closed` and renders.
    pub fn initialize(&mut self) -> CartView {
        self.items = LineItemList::from_entries(load_line_items(self.storage.as_ref(), CART_KEY));
        if !self.mounted {
            self.mounted = true;
            tracing::info!(entries = self.items.len(), "Cart widget mounted");
        }
        self.panel = PanelState::Closed;
        self.render()
    }

    /// Add one unit of `item`, then open the panel if it is closed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be persisted.
    pub fn add_item(&mut self, item: LineItem) -> Result<CartView, WidgetError> {
        let name = item.name.clone();
        let index = self.items.add(item);
        self.persist()?;
        tracing::debug!(name = %name, index, "Added item to cart");

        self.notifier.notify(Notification::added_to_cart(&name));
        if !self.panel.is_open() {
            self.panel.toggle();
        }
        Ok(self.render())
    }

    /// Remove the entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the cart cannot be
    /// persisted.
    pub fn remove_item(&mut self, index: usize) -> Result<CartView, WidgetError> {
        let removed = self.items.remove_at(index)?;
        self.persist()?;
        tracing::debug!(name = %removed.name, index, "Removed item from cart");
        Ok(self.render())
    }

    /// Change the quantity of the entry at `index` by `delta`.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the cart cannot be
    /// persisted.
    pub fn update_quantity(&mut self, index: usize, delta: i32) -> Result<CartView, WidgetError> {
        let outcome = self.items.adjust_quantity(index, delta)?;
        self.persist()?;
        tracing::debug!(index, delta, ?outcome, "Updated cart quantity");
        Ok(self.render())
    }

    /// Flip the side panel and backdrop.
    pub fn toggle_panel(&mut self) -> CartView {
        self.panel.toggle();
        self.render()
    }

    /// Project the current state.
    #[must_use]
    pub fn render(&self) -> CartView {
        CartView::project(&self.items, self.panel)
    }

    /// Current cart list.
    #[must_use]
    pub const fn items(&self) -> &LineItemList<ByNameAndPrice> {
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
        save_line_items(self.storage.as_ref(), CART_KEY, self.items.entries())?;
        Ok(())
    }
}
