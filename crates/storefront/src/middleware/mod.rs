//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The login gate is an extractor ([`RequireUser`]) rather than a layer, so
//! the page and login routes stay reachable while logged out.

pub mod auth;
pub mod request_id;

pub use auth::{AuthRejection, RequireUser};
pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
