//! Static product and menu listing.
//!
//! The page shows two listings: the shop's products (each added to the cart)
//! and the café menu (each added to the orders list). Both come from one YAML
//! file read at startup:
//!
//! ```yaml
//! products:
//!   - name: House Blend
//!     price: "$14.00"
//!     image: /static/images/house-blend.jpg
//! menu:
//!   - class: hot-drinks
//!     title: Hot Drinks
//!     items:
//!       - name: Latte
//!         price: "$4.50"
//! ```
//!
//! Prices are kept as the label the author wrote and parsed with
//! [`Price::parse_label`]. Labels are not validated; a malformed one becomes
//! `NaN`.

use std::path::Path;

use coffee_shop_core::Price;
use serde::Deserialize;

/// Listing loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
struct RawListing {
    #[serde(default)]
    products: Vec<RawProduct>,
    #[serde(default)]
    menu: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    name: String,
    price: String,
    image: String,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    class: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    items: Vec<RawMenuItem>,
}

#[derive(Debug, Deserialize)]
struct RawMenuItem {
    name: String,
    price: String,
}

/// A product the cart can receive.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub name: String,
    pub price_label: String,
    pub price: Price,
    pub image: String,
}

/// A menu item the orders list can receive.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    pub name: String,
    pub price_label: String,
    pub price: Price,
}

/// A group of menu entries rendered under one heading.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub class: String,
    pub title: Option<String>,
    pub entries: Vec<MenuEntry>,
}

/// The parsed listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    products: Vec<ProductEntry>,
    menu: Vec<MenuSection>,
}

impl Listing {
    /// Load the listing from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a listing.
    pub fn load(path: &Path) -> Result<Self, ListingError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ListingError::Io(e.to_string()))?;
        let listing = Self::from_yaml_str(&content)?;
        tracing::info!(
            products = listing.products.len(),
            menu_items = listing.menu_entries().count(),
            "Loaded listing from {}",
            path.display()
        );
        Ok(listing)
    }

    /// Parse a listing from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a listing document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ListingError> {
        let raw: RawListing =
            serde_yaml::from_str(content).map_err(|e| ListingError::Parse(e.to_string()))?;

        let products = raw
            .products
            .into_iter()
            .map(|p| ProductEntry {
                price: Price::parse_label(&p.price),
                name: p.name.trim().to_string(),
                price_label: p.price,
                image: p.image,
            })
            .collect();

        let menu = raw
            .menu
            .into_iter()
            .map(|section| MenuSection {
                class: section.class,
                title: section.title,
                entries: section
                    .items
                    .into_iter()
                    .map(|item| MenuEntry {
                        price: Price::parse_label(&item.price),
                        name: item.name.trim().to_string(),
                        price_label: item.price,
                    })
                    .collect(),
            })
            .collect();

        Ok(Self { products, menu })
    }

    /// Products in listing order.
    #[must_use]
    pub fn products(&self) -> &[ProductEntry] {
        &self.products
    }

    /// Menu sections in listing order.
    #[must_use]
    pub fn menu(&self) -> &[MenuSection] {
        &self.menu
    }

    /// Every menu entry across all sections, in listing order.
    pub fn menu_entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.menu.iter().flat_map(|section| section.entries.iter())
    }
}
