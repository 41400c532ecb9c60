//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! No external services are needed: [`MockBackend`] serves the catalog and
//! order endpoints on an ephemeral local port.
//!
//! # Test Categories
//!
//! - `catalog_client` - HTTP client against the backend contract
//! - `controller` - Store controller flows (catalog, cart, checkout, session)
//! - `routes` - Full router driven with `tower::ServiceExt::oneshot`

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};

use shopfront_core::{NewProduct, Product, ProductId};
use shopfront_storefront::api::CatalogClient;
use shopfront_storefront::config::{ApiConfig, StorefrontConfig};
use shopfront_storefront::controller::StoreController;
use shopfront_storefront::state::AppState;
use shopfront_storefront::storage::LocalStorage;

/// Header the backend reads the storefront access token from.
pub const ACCESS_TOKEN_HEADER: &str = "x-shopify-storefront-access-token";

/// Everything the mock backend has seen and will serve.
#[derive(Debug, Default)]
pub struct BackendState {
    /// Catalog served by `GET /api/products`.
    pub products: Vec<Product>,
    /// When set, every endpoint answers with this status.
    pub fail_with: Option<StatusCode>,
    /// Raw order bodies received.
    pub orders: Vec<Value>,
    /// Product payloads received.
    pub created: Vec<Value>,
    /// Access tokens sent with product creation.
    pub access_tokens: Vec<Option<String>>,
    /// Ids passed to `DELETE /api/products/{id}`.
    pub deleted: Vec<i64>,
    /// Number of catalog fetches served.
    pub list_calls: usize,
}

type Shared = Arc<Mutex<BackendState>>;

/// In-process stand-in for the catalog and order backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    /// Start a backend serving `products`.
    pub async fn start(products: Vec<Product>) -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            products,
            ..BackendState::default()
        }));

        let app = Router::new()
            .route("/api/products", get(list_products).post(create_product))
            .route("/api/products/{id}", delete(delete_product))
            .route("/api/orders", axum::routing::post(place_order))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self { addr, state }
    }

    /// Base URL to point clients at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Inspect or mutate backend state.
    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    /// Make every endpoint fail with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        self.state().fail_with = Some(status);
    }

    /// Replace the served catalog.
    pub fn set_products(&self, products: Vec<Product>) {
        self.state().products = products;
    }

    /// API configuration for this backend.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.url()).unwrap()
    }

    /// Client for this backend.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.api_config())
    }

    /// Controller talking to this backend with in-memory storage.
    #[must_use]
    pub fn controller(&self) -> StoreController {
        StoreController::new(self.client(), LocalStorage::in_memory())
    }

    /// Application state for this backend with storage at a fresh temp path.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        let url = self.url();
        let storage_path = temp_storage_path();
        let config = StorefrontConfig::from_lookup(|key| match key {
            "SHOPFRONT_API_URL" => Some(url.clone()),
            "SHOPFRONT_LOCAL_STORAGE" => Some(storage_path.display().to_string()),
            _ => None,
        })
        .unwrap();
        AppState::new(config).unwrap()
    }
}

/// A local storage path that does not exist yet.
#[must_use]
pub fn temp_storage_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("shopfront-it-{}", uuid::Uuid::new_v4()))
        .join("local_storage.json")
}

/// Build a catalog product.
#[must_use]
pub fn product(id: i64, title: &str, price: Decimal) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        availability: true,
        image_url: None,
    }
}

/// The two-product catalog most tests start from.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product(1, "Widget", Decimal::new(10, 0)),
        product(2, "Gadget", Decimal::new(550, 2)),
    ]
}

fn failure(state: &BackendState) -> Option<Response> {
    state
        .fail_with
        .map(|status| (status, "backend unavailable").into_response())
}

async fn list_products(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    state.list_calls += 1;
    if let Some(response) = failure(&state) {
        return response;
    }
    Json(state.products.clone()).into_response()
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    state.access_tokens.push(
        headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    );
    state.created.push(body.clone());

    let Ok(payload) = serde_json::from_value::<NewProduct>(body) else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };
    let next_id = state
        .products
        .iter()
        .map(|p| p.id.as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let created = Product {
        id: ProductId::new(next_id),
        title: payload.title,
        description: payload.description,
        price: payload.price,
        availability: payload.availability,
        image_url: None,
    };
    state.products.push(created.clone());

    (StatusCode::CREATED, Json(json!({ "product": created }))).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }
    state.deleted.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn place_order(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }
    state.orders.push(body);
    let number = state.orders.len();
    Json(json!({ "orderId": number, "status": "received" })).into_response()
}
