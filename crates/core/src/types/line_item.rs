//! Line items and the insertion-ordered list both widgets keep.
//!
//! The cart and the orders list differ only in how they decide that an added
//! item is already present. That decision is a [`MatchRule`] type parameter,
//! so each widget gets its own list type:
//!
//! ```
//! use coffee_shop_core::{ByNameAndPrice, LineItem, LineItemList, Price};
//!
//! let mut cart = LineItemList::<ByNameAndPrice>::new();
//! cart.add(LineItem::new("Latte", Price::new(4.5)));
//! cart.add(LineItem::new("Latte", Price::new(4.5)));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.total_quantity(), 2);
//! assert_eq!(cart.total_price().to_string(), "$9.00");
//! ```

use core::fmt;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Errors returned by index-based list operations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItemError {
    /// The index does not point at an entry of the current list.
    #[error("line item index {index} is out of range (list has {len} entries)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },
    /// The adjusted quantity does not fit in a `u32`.
    #[error("line item quantity overflow")]
    QuantityOverflow,
}

/// One entry of a cart or orders list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display label.
    pub name: String,
    /// Price of a single unit.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Number of units, always at least 1 while the entry is in a list.
    pub quantity: u32,
    /// Product image reference (cart entries only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    /// Create a single-unit line item without an image.
    #[must_use]
    pub fn new(name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity: 1,
            image: None,
        }
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Price of the whole line (`unit_price * quantity`).
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Decides whether two line items describe the same product.
pub trait MatchRule {
    /// Returns true if `candidate` should be merged into `existing`.
    fn same_item(existing: &LineItem, candidate: &LineItem) -> bool;
}

/// Cart identity: name and unit price must both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByNameAndPrice;

impl MatchRule for ByNameAndPrice {
    // IEEE comparison: a `NaN` price never matches, not even another `NaN`.
    #[allow(clippy::float_cmp)]
    fn same_item(existing: &LineItem, candidate: &LineItem) -> bool {
        existing.name == candidate.name
            && existing.unit_price.amount() == candidate.unit_price.amount()
    }
}

/// Orders identity: the name alone identifies an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByName;

impl MatchRule for ByName {
    fn same_item(existing: &LineItem, candidate: &LineItem) -> bool {
        existing.name == candidate.name
    }
}

/// Outcome of [`LineItemList::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// The entry stays, with the new quantity.
    Updated(u32),
    /// The quantity dropped below 1 and the entry was removed.
    Removed,
}

/// An insertion-ordered list of line items deduplicated by `R`.
pub struct LineItemList<R> {
    entries: Vec<LineItem>,
    rule: PhantomData<fn() -> R>,
}

impl<R: MatchRule> LineItemList<R> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            rule: PhantomData,
        }
    }

    /// Build a list from hydrated entries.
    ///
    /// Entries with a zero quantity are dropped so the list never starts out
    /// violating the `quantity >= 1` invariant.
    #[must_use]
    pub fn from_entries(mut entries: Vec<LineItem>) -> Self {
        entries.retain(|entry| entry.quantity >= 1);
        Self {
            entries,
            rule: PhantomData,
        }
    }

    /// Borrow the entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LineItem] {
        &self.entries
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.entries.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry matching `predicate`.
    ///
    /// This is the lookup for callers. [`add`](Self::add) locates its merge
    /// target by position under `R` instead, since it needs the index.
    pub fn find(&self, predicate: impl Fn(&LineItem) -> bool) -> Option<&LineItem> {
        self.entries.iter().find(|entry| predicate(entry))
    }

    /// Add one unit of `item`.
    ///
    /// If an entry matching `item` under `R` exists its quantity goes up by
    /// one, otherwise `item` is appended with quantity 1. Returns the index of
    /// the affected entry.
    pub fn add(&mut self, item: LineItem) -> usize {
        if let Some(index) = self
            .entries
            .iter()
            .position(|existing| R::same_item(existing, &item))
        {
            if let Some(existing) = self.entries.get_mut(index) {
                existing.quantity = existing.quantity.saturating_add(1);
            }
            return index;
        }

        self.entries.push(LineItem { quantity: 1, ..item });
        self.entries.len() - 1
    }

    /// Add `delta` to the quantity of the entry at `index`.
    ///
    /// An entry whose quantity would fall below 1 is removed.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::IndexOutOfRange`] if `index` is not a position
    /// in the current list, leaving the list untouched.
    pub fn adjust_quantity(&mut self, index: usize, delta: i32) -> Result<Adjustment, LineItemError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LineItemError::IndexOutOfRange { index, len })?;

        let adjusted = i64::from(entry.quantity) + i64::from(delta);
        if adjusted < 1 {
            self.entries.remove(index);
            return Ok(Adjustment::Removed);
        }

        let quantity = u32::try_from(adjusted).map_err(|_| LineItemError::QuantityOverflow)?;
        entry.quantity = quantity;
        Ok(Adjustment::Updated(quantity))
    }

    /// Remove the entry at `index` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::IndexOutOfRange`] if `index` is not a position
    /// in the current list.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem, LineItemError> {
        if index >= self.entries.len() {
            return Err(LineItemError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    /// Sum of `unit_price * quantity` over all entries.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.entries.iter().map(LineItem::line_price).sum()
    }
}

impl<R: MatchRule> Default for LineItemList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for LineItemList<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            rule: PhantomData,
        }
    }
}

impl<R> PartialEq for LineItemList<R> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<R> fmt::Debug for LineItemList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::cast_possible_truncation)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    type CartList = LineItemList<ByNameAndPrice>;
    type OrdersList = LineItemList<ByName>;

    fn latte() -> LineItem {
        LineItem::new("Latte", Price::new(4.5))
    }

    fn mocha() -> LineItem {
        LineItem::new("Mocha", Price::new(5.0))
    }

    #[test]
    fn test_add_same_item_increments() {
        let mut list = CartList::new();
        for _ in 0..5 {
            list.add(latte());
        }
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].quantity, 5);
    }

    #[test]
    fn test_add_ignores_incoming_quantity() {
        let mut list = CartList::new();
        list.add(LineItem {
            quantity: 7,
            ..latte()
        });
        assert_eq!(list.entries()[0].quantity, 1);
    }

    #[test]
    fn test_cart_rule_distinguishes_price() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(LineItem::new("Latte", Price::new(5.0)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_orders_rule_merges_by_name() {
        let mut list = OrdersList::new();
        list.add(latte());
        list.add(LineItem::new("Latte", Price::new(5.0)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].quantity, 2);
        // First price wins.
        assert_eq!(list.entries()[0].unit_price, Price::new(4.5));
    }

    #[test]
    fn test_nan_price_never_merges_in_cart() {
        let mut list = CartList::new();
        list.add(LineItem::new("Odd", Price::parse_label("n/a")));
        list.add(LineItem::new("Odd", Price::parse_label("n/a")));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_insertion_order_kept_on_update() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(mocha());
        list.add(latte());
        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Latte", "Mocha"]);
    }

    #[test]
    fn test_find() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(mocha());
        assert_eq!(list.find(|e| e.name == "Mocha").unwrap().name, "Mocha");
        assert!(list.find(|e| e.name == "Cortado").is_none());
    }

    #[test]
    fn test_adjust_quantity_up_and_down() {
        let mut list = CartList::new();
        list.add(latte());
        assert_eq!(list.adjust_quantity(0, 1), Ok(Adjustment::Updated(2)));
        assert_eq!(list.adjust_quantity(0, -1), Ok(Adjustment::Updated(1)));
    }

    #[test]
    fn test_adjust_quantity_to_zero_removes() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(mocha());
        assert_eq!(list.adjust_quantity(0, -1), Ok(Adjustment::Removed));
        assert_eq!(list.len(), 1);
        assert!(list.iter().all(|e| e.quantity >= 1));
        assert_eq!(list.entries()[0].name, "Mocha");
    }

    #[test]
    fn test_adjust_quantity_out_of_range() {
        let mut list = CartList::new();
        list.add(latte());
        assert_eq!(
            list.adjust_quantity(3, 1),
            Err(LineItemError::IndexOutOfRange { index: 3, len: 1 })
        );
        assert_eq!(list.entries()[0].quantity, 1);
    }

    #[test]
    fn test_remove_at() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(latte());
        list.add(mocha());
        let removed = list.remove_at(0).unwrap();
        assert_eq!(removed.quantity, 2);
        assert_eq!(list.entries(), &[mocha()]);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = CartList::new();
        assert!(list.remove_at(0).is_err());
    }

    #[test]
    fn test_totals() {
        let mut list = CartList::new();
        list.add(latte());
        list.add(latte());
        list.add(mocha());
        assert_eq!(list.total_quantity(), 3);
        assert_eq!(list.total_price(), Price::new(14.0));
    }

    #[test]
    fn test_empty_totals() {
        let list = OrdersList::new();
        assert_eq!(list.total_quantity(), 0);
        assert_eq!(list.total_price().to_string(), "$0.00");
    }

    #[test]
    fn test_from_entries_drops_zero_quantity() {
        let list = CartList::from_entries(vec![
            LineItem {
                quantity: 0,
                ..latte()
            },
            mocha(),
        ]);
        assert_eq!(list.entries(), &[mocha()]);
    }

    #[test]
    fn test_clear() {
        let mut list = OrdersList::new();
        list.add(latte());
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let item = latte();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Latte", "price": 4.5, "quantity": 1})
        );

        let with_image = serde_json::to_value(item.with_image("img/latte.jpg")).unwrap();
        assert_eq!(with_image["image"], "img/latte.jpg");
    }

    const NAMES: [&str; 4] = ["Latte", "Mocha", "Espresso", "Scone"];

    /// Quarter-dollar prices keep float sums exact.
    fn quarter_price(quarters: u8) -> Price {
        Price::new(f64::from(quarters) * 0.25)
    }

    fn arb_item() -> impl Strategy<Value = LineItem> {
        (0..NAMES.len(), 0u8..40).prop_map(|(name, quarters)| {
            LineItem::new(NAMES[name], quarter_price(quarters))
        })
    }

    fn arb_hydrated_item() -> impl Strategy<Value = LineItem> {
        (arb_item(), 1u32..50, any::<bool>(), any::<bool>()).prop_map(
            |(item, quantity, nan, image)| {
                let item = LineItem {
                    quantity,
                    unit_price: if nan { Price::parse_label("n/a") } else { item.unit_price },
                    ..item
                };
                if image { item.with_image("img/item.jpg") } else { item }
            },
        )
    }

    proptest! {
        #[test]
        fn cart_add_counts_match_identity(items in prop::collection::vec(arb_item(), 0..40)) {
            let mut list = CartList::new();
            for item in &items {
                list.add(item.clone());
            }

            for entry in list.iter() {
                let expected = items
                    .iter()
                    .filter(|item| item.name == entry.name && item.unit_price == entry.unit_price)
                    .count();
                prop_assert_eq!(entry.quantity as usize, expected);
            }
            prop_assert_eq!(list.total_quantity(), items.len() as u64);

            let expected_total: Price = items.iter().map(|item| item.unit_price).sum();
            prop_assert_eq!(list.total_price(), expected_total);
        }

        #[test]
        fn orders_add_merges_by_name(items in prop::collection::vec(arb_item(), 0..40)) {
            let mut list = OrdersList::new();
            for item in &items {
                list.add(item.clone());
            }

            let mut names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(list.len(), names.len());

            for entry in list.iter() {
                let first = items.iter().find(|item| item.name == entry.name).unwrap();
                prop_assert_eq!(entry.unit_price, first.unit_price);
            }
        }

        #[test]
        fn adjustments_keep_quantities_positive(
            items in prop::collection::vec(arb_item(), 1..20),
            steps in prop::collection::vec((0usize..25, -3i32..4), 0..40),
        ) {
            let mut list = CartList::new();
            for item in items {
                list.add(item);
            }

            for (index, delta) in steps {
                let len = list.len();
                let result = list.adjust_quantity(index, delta);
                prop_assert_eq!(result.is_err(), index >= len);
                prop_assert!(list.iter().all(|entry| entry.quantity >= 1));

                let sum: u64 = list.iter().map(|entry| u64::from(entry.quantity)).sum();
                prop_assert_eq!(list.total_quantity(), sum);
                let total: Price = list.iter().map(LineItem::line_price).sum();
                prop_assert_eq!(list.total_price(), total);
            }
        }

        #[test]
        fn json_round_trip_preserves_list(
            entries in prop::collection::vec(arb_hydrated_item(), 0..10),
        ) {
            let list = CartList::from_entries(entries);
            let json = serde_json::to_string(list.entries()).unwrap();
            let back = CartList::from_entries(serde_json::from_str(&json).unwrap());
            prop_assert_eq!(back, list);
        }
    }
}
