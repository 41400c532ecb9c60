//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store page (login gate when logged out)
//! GET  /health                 - Health check
//!
//! # Auth (simulated)
//! POST /auth/login             - Fabricate and store a session user
//! POST /auth/logout            - Forget the session user
//!
//! # Products (login required)
//! POST /products               - Create product
//! POST /products/refresh       - Re-fetch the catalog
//! GET  /products/{id}          - Select product
//! POST /products/{id}/delete   - Delete product
//!
//! # Cart (login required)
//! POST /cart/add               - Add selected product
//! POST /cart/update            - Set line quantity
//! POST /cart/remove            - Remove line
//!
//! # Checkout (login required)
//! POST /orders                 - Save checkout forms and place order
//! POST /payment                - Payment placeholder
//!
//! # Assets
//! GET  /static/*               - Stylesheet
//! ```
//!
//! Every mutating route redirects back to `/`.

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod store;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{make_request_span, request_id_middleware};
use crate::state::AppState;

/// Directory holding the stylesheet.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create))
        .route("/refresh", post(products::refresh))
        .route("/{id}", get(products::select))
        .route("/{id}/delete", post(products::delete))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Store page
        .route("/", get(store::index))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/orders", post(orders::place))
        .route("/payment", post(orders::payment))
        // Auth routes
        .nest("/auth", auth_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}

/// Build the complete application router.
///
/// Includes tracing and request-id layers; error tracking layers are added by
/// the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
}
