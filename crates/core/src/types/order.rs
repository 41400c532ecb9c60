//! Order submission types.
//!
//! Customer and shipping records are flat free-text forms. An [`Order`] is
//! assembled only at submission time and dropped once the backend accepts it.

use serde::{Deserialize, Serialize};

use super::cart::{Cart, CartLine};

/// Customer details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Shipping details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

/// The bundle sent to the order endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub customer: CustomerInfo,
    pub products: Vec<CartLine>,
    pub shipping: ShippingInfo,
}

impl Order {
    /// Snapshot the cart and checkout forms into an order.
    #[must_use]
    pub fn from_parts(customer: &CustomerInfo, cart: &Cart, shipping: &ShippingInfo) -> Self {
        Self {
            customer: customer.clone(),
            products: cart.lines().to_vec(),
            shipping: shipping.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::types::{Product, ProductId};

    #[test]
    fn test_order_wire_shape() {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(1),
            title: "Widget".to_string(),
            description: String::new(),
            price: Decimal::new(10, 0),
            availability: true,
            image_url: None,
        });

        let customer = CustomerInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Loop Rd".to_string(),
        };
        let shipping = ShippingInfo {
            address: "1 Loop Rd".to_string(),
            city: "Springfield".to_string(),
            zip: "12345".to_string(),
            country: "US".to_string(),
        };

        let order = Order::from_parts(&customer, &cart, &shipping);
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["customer"]["name"], json!("Ada"));
        assert_eq!(value["shipping"]["zip"], json!("12345"));
        assert_eq!(value["products"][0]["quantity"], json!(1));
        assert_eq!(value["products"][0]["title"], json!("Widget"));
    }
}
