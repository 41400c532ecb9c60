//! Client-side shopping cart.
//!
//! The cart is an ordered list of lines, unique by product id, built purely
//! from user actions. Nothing here is persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Errors from cart updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Quantities must be at least 1; use removal to drop a line.
    #[error("invalid quantity {0}: must be at least 1")]
    InvalidQuantity(i64),

    /// Quantity does not fit the cart's counter.
    #[error("invalid quantity {0}: must be at most 4294967295")]
    QuantityTooLarge(i64),
}

/// One product plus the quantity the user intends to buy.
///
/// Serialized as the product's own fields with `quantity` alongside, which is
/// the shape the order endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (unit price times quantity).
    ///
    /// `None` if the product overflows `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Overwrite the quantity of a line.
    ///
    /// Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity` is below 1, or
    /// `CartError::QuantityTooLarge` if it does not fit a `u32`. The line is
    /// left unchanged.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| CartError::QuantityTooLarge(quantity))?;

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
        Ok(())
    }

    /// Remove a line. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of all line totals.
    ///
    /// `None` if any line total or the running sum overflows `Decimal`.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.line_total()?))
            .map(Price::usd)
    }
}
