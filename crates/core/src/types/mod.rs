//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod user;

pub use cart::{Cart, CartError, CartLine};
pub use id::*;
pub use order::{CustomerInfo, Order, ShippingInfo};
pub use price::Price;
pub use product::{NewProduct, Product};
pub use user::{PLACEHOLDER_EMAIL, SessionUser};
