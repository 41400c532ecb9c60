//! REST client for the catalog and order backend.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP with `reqwest`
//! - The backend is the source of truth for products - NO local cache,
//!   every fetch replaces the catalog wholesale
//! - No retries, no timeouts: callers log failures and keep their state
//!
//! # Endpoints
//!
//! ```text
//! GET    /api/products        - product list (flat JSON array)
//! POST   /api/products        - create product
//! DELETE /api/products/{id}   - delete product
//! POST   /api/orders          - submit order
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::api::CatalogClient;
//!
//! let client = CatalogClient::new(&config.api);
//! let products = client.list_products().await?;
//! ```

mod client;

pub use client::{CatalogClient, OrderConfirmation};

use reqwest::StatusCode;
use thiserror::Error;

/// Longest backend body excerpt kept in an error.
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {}", display_body(.body))]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Truncated response body.
        body: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Build a status error, truncating the body.
    pub(crate) fn status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(ERROR_BODY_LIMIT).collect(),
        }
    }

    /// The HTTP status, if the backend answered at all.
    #[must_use]
    pub const fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn display_body(body: &str) -> &str {
    if body.trim().is_empty() {
        "(empty body)"
    } else {
        body
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.to_string(), "Backend returned 500 Internal Server Error: boom");
        assert_eq!(err.status_code(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_status_error_empty_body() {
        let err = ApiError::status(StatusCode::NOT_FOUND, "  ");
        assert_eq!(err.to_string(), "Backend returned 404 Not Found: (empty body)");
    }

    #[test]
    fn test_status_error_truncates_body() {
        let body = "x".repeat(1000);
        let ApiError::Status { body, .. } = ApiError::status(StatusCode::BAD_GATEWAY, &body)
        else {
            unreachable!("status() always builds a Status error");
        };
        assert_eq!(body.len(), ERROR_BODY_LIMIT);
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = ApiError::from(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(err.status_code().is_none());
        assert!(err.to_string().starts_with("JSON parse error"));
    }
}
