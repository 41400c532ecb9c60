//! Shopfront Core - Catalog, cart, and order types.
//!
//! This crate provides the types shared by the Shopfront components:
//! - `storefront` - Server-rendered store UI backed by a REST catalog
//! - `cli` - Command-line tools for managing the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients. The cart manager lives here because it is derived
//! entirely from user actions.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, products, cart lines, orders, and session users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
