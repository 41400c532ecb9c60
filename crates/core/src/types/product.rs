//! Catalog product types.
//!
//! Products are owned by the catalog and replaced wholesale on every
//! successful fetch. Prices are read leniently (the backend may send either
//! numbers or numeric strings) and always written back as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

const fn default_availability() -> bool {
    true
}

/// A purchasable product as known to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(
        rename = "imageUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<String>,
}

impl Product {
    /// The product's price in the store currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub availability: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_reads_numeric_and_string_prices() {
        let numeric: Product =
            serde_json::from_value(json!({"id": 1, "title": "Widget", "price": 10})).unwrap();
        assert_eq!(numeric.price, Decimal::new(10, 0));

        let text: Product =
            serde_json::from_value(json!({"id": 2, "title": "Gadget", "price": "4.50"})).unwrap();
        assert_eq!(text.price, Decimal::new(450, 2));
    }

    #[test]
    fn test_product_defaults() {
        let product: Product =
            serde_json::from_value(json!({"id": 1, "title": "Widget", "price": 10})).unwrap();
        assert!(product.availability);
        assert!(product.description.is_empty());
        assert!(product.image_url.is_none());
    }

    #[test]
    fn test_product_image_url_uses_camel_case() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Widget",
            "price": 10,
            "imageUrl": "https://cdn.example.com/widget.png"
        }))
        .unwrap();
        assert_eq!(
            product.image_url.as_deref(),
            Some("https://cdn.example.com/widget.png")
        );

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["imageUrl"], "https://cdn.example.com/widget.png");
        assert!(value.get("image_url").is_none());
    }

    #[test]
    fn test_new_product_writes_price_as_number() {
        let payload = NewProduct {
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            price: Decimal::new(1250, 2),
            availability: false,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["price"], json!(12.5));
        assert_eq!(value["availability"], json!(false));
        assert_eq!(value.as_object().unwrap().len(), 4);
    }
}
