//! Coffee Shop Core - Shared types library.
//!
//! This crate provides the types shared by every coffee shop component:
//! - `storefront` - Page host for the cart and orders widgets
//! - `cli` - Command-line tools for inspecting persisted widget state
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no HTTP. Every widget state transition that can be expressed without a
//! side effect lives here so it can be tested on its own.
//!
//! # Modules
//!
//! - [`types`] - Prices, line items, identity rules and panel state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
