//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! shopfront-cli products list
//!
//! # Create a product
//! shopfront-cli products create -t "Widget" -p 10.00 -d "A widget"
//!
//! # Delete a product
//! shopfront-cli products delete 7
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_API_URL` - Backend base URL (default: <http://localhost:3001>)
//! - `SHOPFRONT_ACCESS_TOKEN` - Storefront access token for product creation

use rust_decimal::Decimal;
use thiserror::Error;

use shopfront_core::{NewProduct, Product, ProductId};
use shopfront_storefront::api::{ApiError, CatalogClient};
use shopfront_storefront::config::{ApiConfig, ConfigError};

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum ProductsError {
    /// Backend URL is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend request failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Title was blank.
    #[error("Product title cannot be empty")]
    EmptyTitle,

    /// Price was negative.
    #[error("Invalid price: {0}. Price cannot be negative")]
    NegativePrice(Decimal),
}

/// Build a client for the configured backend.
///
/// # Errors
///
/// Returns an error if `api_url` is not an http(s) URL.
pub fn client(api_url: &str, access_token: Option<String>) -> Result<CatalogClient, ProductsError> {
    let mut config = ApiConfig::new(api_url)?;
    if let Some(token) = access_token {
        config = config.with_access_token(token);
    }
    Ok(CatalogClient::new(&config))
}

/// One line of `products list` output.
#[must_use]
pub fn describe(product: &Product) -> String {
    let availability = if product.availability {
        "available"
    } else {
        "unavailable"
    };
    format!(
        "#{} {} - {} ({availability})",
        product.id,
        product.title,
        product.unit_price()
    )
}

/// Validate create arguments into a payload.
///
/// # Errors
///
/// Returns an error if the title is blank or the price is negative.
pub fn new_product(
    title: &str,
    description: &str,
    price: Decimal,
    unavailable: bool,
) -> Result<NewProduct, ProductsError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ProductsError::EmptyTitle);
    }
    if price.is_sign_negative() {
        return Err(ProductsError::NegativePrice(price));
    }

    Ok(NewProduct {
        title: title.to_owned(),
        description: description.to_owned(),
        price,
        availability: !unavailable,
    })
}

/// List every product.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn list(client: &CatalogClient) -> Result<(), ProductsError> {
    let products = client.list_products().await?;

    if products.is_empty() {
        tracing::info!("Catalog is empty");
    }
    for product in &products {
        tracing::info!("{}", describe(product));
    }

    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn create(client: &CatalogClient, product: &NewProduct) -> Result<(), ProductsError> {
    tracing::info!("Creating product: {}", product.title);

    match client.create_product(product).await? {
        Some(created) => tracing::info!("Created {}", describe(&created)),
        None => tracing::info!("Product created"),
    }

    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns an error if the backend request fails.
pub async fn delete(client: &CatalogClient, id: ProductId) -> Result<(), ProductsError> {
    client.delete_product(id).await?;
    tracing::info!("Deleted product #{id}");
    Ok(())
}
