//! Unit price representation.
//!
//! Prices are read from listing labels such as `"$4.50"` and carried as a
//! binary float. A label that does not start with a finite number parses to
//! `NaN`, and that `NaN` flows into every total it touches. Listing authors
//! are expected to keep labels in the `$<number>` shape.
//!
//! # Wire format
//!
//! A price serializes as a bare JSON number. Non-finite values serialize as
//! `null` and `null` deserializes back to `NaN`. Since a parsed price is
//! either finite or `NaN`, parsed prices survive a round trip unchanged.
//!
//! # Equality
//!
//! `NaN` prices compare equal to each other so that a persisted list equals
//! its hydrated copy. Identity rules that must follow IEEE semantics compare
//! [`Price::amount`] instead.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Leading numeric prefix accepted by [`Price::parse_label`].
static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("Invalid regex")
});

/// A unit price or total in dollars.
#[derive(Debug, Clone, Copy, Default)]
pub struct Price(f64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0.0);

    /// Create a price from a dollar amount.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// Parse a price from a listing label.
    ///
    /// The first `$` is dropped, leading whitespace is skipped and the longest
    /// numeric prefix is read. Anything after the prefix is ignored. A label
    /// with no numeric prefix, or one that overflows to infinity, yields
    /// `NaN`. Spelled-out `Infinity` is not a number here either.
    ///
    /// ```
    /// use coffee_shop_core::Price;
    ///
    /// assert_eq!(Price::parse_label("$4.50").amount(), 4.5);
    /// assert_eq!(Price::parse_label("3 each").amount(), 3.0);
    /// assert!(Price::parse_label("free").is_nan());
    /// assert!(Price::parse_label("$1e999").is_nan());
    /// ```
    #[must_use]
    pub fn parse_label(label: &str) -> Self {
        let stripped = label.replacen('$', "", 1);
        let trimmed = stripped.trim_start();
        LEADING_NUMBER_RE
            .find(trimmed)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|amount| amount.is_finite())
            .map_or(Self(f64::NAN), Self)
    }

    /// Get the dollar amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Whether the price came from an unparseable label.
    #[must_use]
    pub const fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * f64::from(quantity))
    }
}

impl PartialEq for Price {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0.is_nan() && other.0.is_nan())
    }
}

impl fmt::Display for Price {
    /// Formats as `$9.00`. Non-finite amounts print as `$NaN` / `$Infinity`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("$NaN")
        } else if self.0.is_infinite() {
            let sign = if self.0.is_sign_negative() { "-" } else { "" };
            write!(f, "${sign}Infinity")
        } else {
            write!(f, "${:.2}", self.0)
        }
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else {
            serializer.serialize_none()
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = Option::<f64>::deserialize(deserializer)?;
        Ok(Self(amount.unwrap_or(f64::NAN)))
    }
}
