//! CLI command implementations.

pub mod products;
