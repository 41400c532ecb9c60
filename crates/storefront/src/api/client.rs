//! Catalog and order client implementation.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use shopfront_core::{NewProduct, Order, Product, ProductId};

use super::ApiError;
use crate::config::ApiConfig;

/// Header carrying the storefront access token on product creation.
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Whatever the order endpoint echoes back. The contract does not fix a
/// shape, so it is kept as raw JSON (`Null` for an empty body).
pub type OrderConfirmation = serde_json::Value;

/// Shapes accepted from `POST /api/products`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedProduct {
    Wrapped { product: Product },
    Bare(Product),
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the catalog and order backend.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<SecretString>,
}

impl CatalogClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        // Url::join drops the last path segment unless it ends with '/'
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and return the body of a successful response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Backend returned non-success status"
            );
            return Err(ApiError::status(status, &body));
        }

        Ok(body)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or the body is not a JSON array of products.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("api/products")?;
        let body = self.execute(self.inner.client.get(url)).await?;

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse product list"
            );
            e
        })?;

        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Create a product.
    ///
    /// Returns the created product when the backend echoes it back, either
    /// bare or wrapped as `{"product": ...}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers with a
    /// non-success status.
    #[instrument(skip(self, product), fields(title = %product.title))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Option<Product>, ApiError> {
        let url = self.endpoint("api/products")?;
        let mut request = self.inner.client.post(url).json(product);

        if let Some(token) = &self.inner.access_token {
            request = request.header(ACCESS_TOKEN_HEADER, token.expose_secret());
        }

        let body = self.execute(request).await?;

        let created = match serde_json::from_str::<CreatedProduct>(&body) {
            Ok(CreatedProduct::Wrapped { product } | CreatedProduct::Bare(product)) => {
                Some(product)
            }
            Err(e) => {
                debug!(error = %e, "Create response did not contain a product");
                None
            }
        };

        Ok(created)
    }

    /// Delete a product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers with a
    /// non-success status.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("api/products/{id}"))?;
        self.execute(self.inner.client.delete(url)).await?;
        Ok(())
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers with a
    /// non-success status, or a non-empty body is not valid JSON.
    #[instrument(skip(self, order), fields(lines = order.products.len()))]
    pub async fn place_order(&self, order: &Order) -> Result<OrderConfirmation, ApiError> {
        let url = self.endpoint("api/orders")?;
        let body = self.execute(self.inner.client.post(url).json(order)).await?;

        if body.trim().is_empty() {
            return Ok(OrderConfirmation::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = ApiConfig::new("http://localhost:3001/store").unwrap();
        let client = CatalogClient::new(&config);
        assert_eq!(client.base_url().as_str(), "http://localhost:3001/store/");
        assert_eq!(
            client.endpoint("api/products").unwrap().as_str(),
            "http://localhost:3001/store/api/products"
        );
    }

    #[test]
    fn test_endpoint_for_root_base() {
        let config = ApiConfig::new("http://localhost:3001").unwrap();
        let client = CatalogClient::new(&config);
        assert_eq!(
            client.endpoint("api/products/7").unwrap().as_str(),
            "http://localhost:3001/api/products/7"
        );
    }

    #[test]
    fn test_created_product_shapes() {
        let wrapped: CreatedProduct = serde_json::from_str(
            r#"{"product": {"id": 3, "title": "Lamp", "price": 20}}"#,
        )
        .unwrap();
        assert!(matches!(
            wrapped,
            CreatedProduct::Wrapped { product } if product.id == ProductId::new(3)
        ));

        let bare: CreatedProduct =
            serde_json::from_str(r#"{"id": 4, "title": "Rug", "price": "99.00"}"#).unwrap();
        assert!(matches!(bare, CreatedProduct::Bare(product) if product.id == ProductId::new(4)));
    }
}
