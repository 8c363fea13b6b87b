//! Pure `list -> view` projections consumed by the templates.
//!
//! A view is rebuilt from scratch after every mutation. Every row action in a
//! view is bound to the row's index in the list it was projected from, so a
//! freshly rendered widget never carries actions from an earlier render.

use coffee_shop_core::{LineItem, LineItemList, MatchRule, PanelState, Price};

/// Placeholder shown in an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// Placeholder shown in an empty orders list.
pub const EMPTY_ORDERS_MESSAGE: &str = "No orders yet";

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemView {
    pub index: usize,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub image: Option<String>,
}

impl LineItemView {
    fn project(index: usize, item: &LineItem) -> Self {
        Self {
            index,
            name: item.name.clone(),
            unit_price: item.unit_price.to_string(),
            quantity: item.quantity,
            image: item.image.clone(),
        }
    }
}

fn project_rows<R: MatchRule>(list: &LineItemList<R>) -> Vec<LineItemView> {
    list.iter()
        .enumerate()
        .map(|(index, item)| LineItemView::project(index, item))
        .collect()
}

fn project_total<R: MatchRule>(list: &LineItemList<R>) -> String {
    if list.is_empty() {
        Price::ZERO.to_string()
    } else {
        list.total_price().to_string()
    }
}

/// Cart widget display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    /// Shared by the header badge, the toggle label and the floating counter.
    pub item_count: u64,
    pub total: String,
    pub counter_visible: bool,
    pub panel: PanelState,
}

impl CartView {
    /// Project a cart list and its panel state.
    #[must_use]
    pub fn project<R: MatchRule>(list: &LineItemList<R>, panel: PanelState) -> Self {
        let item_count = list.total_quantity();
        Self {
            items: project_rows(list),
            item_count,
            total: project_total(list),
            counter_visible: item_count > 0,
            panel,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        EMPTY_CART_MESSAGE
    }

    #[must_use]
    pub const fn panel_class(&self) -> &'static str {
        self.panel.css_class()
    }
}

/// Orders widget display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersView {
    pub items: Vec<LineItemView>,
    /// Shared by the header count and the toggle badge.
    pub item_count: u64,
    pub total: String,
    pub panel: PanelState,
}

impl OrdersView {
    /// Project an orders list and its panel state.
    #[must_use]
    pub fn project<R: MatchRule>(list: &LineItemList<R>, panel: PanelState) -> Self {
        Self {
            items: project_rows(list),
            item_count: list.total_quantity(),
            total: project_total(list),
            panel,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn empty_message(&self) -> &'static str {
        EMPTY_ORDERS_MESSAGE
    }

    #[must_use]
    pub const fn panel_class(&self) -> &'static str {
        self.panel.css_class()
    }
}
