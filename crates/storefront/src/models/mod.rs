//! Domain models for storefront.
//!
//! Catalog, cart, and order types live in `shopfront-core`; this module
//! holds the storefront-only session types.

pub mod session;

pub use session::{LoginCredentials, keys as storage_keys};
