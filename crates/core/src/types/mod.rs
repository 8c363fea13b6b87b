//! Core types for the coffee shop widgets.
//!
//! This module provides type-safe wrappers for the widget domain concepts.

pub mod line_item;
pub mod panel;
pub mod price;

pub use line_item::{
    Adjustment, ByName, ByNameAndPrice, LineItem, LineItemError, LineItemList, MatchRule,
};
pub use panel::PanelState;
pub use price::Price;
