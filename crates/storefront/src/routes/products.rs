//! Product route handlers.
//!
//! Catalog failures are logged by the controller; every handler returns to
//! the store page regardless of outcome.

use axum::{Form, extract::Path, response::Redirect};
use tracing::instrument;

use shopfront_core::ProductId;

use crate::controller::NewProductForm;
use crate::middleware::RequireUser;

/// Re-fetch the catalog.
#[instrument(skip(session))]
pub async fn refresh(mut session: RequireUser) -> Redirect {
    session.controller.fetch_products().await;
    Redirect::to("/")
}

/// Select a product for the details and delete panels.
#[instrument(skip(session))]
pub async fn select(mut session: RequireUser, Path(id): Path<ProductId>) -> Redirect {
    if !session.controller.select_product(id) {
        tracing::debug!(product_id = %id, "Selected product is not in the catalog");
    }
    Redirect::to("/")
}

/// Create a product from the submitted form.
#[instrument(skip(session, form), fields(title = %form.title))]
pub async fn create(mut session: RequireUser, Form(form): Form<NewProductForm>) -> Redirect {
    session.controller.update_new_product(form);
    session.controller.create_product().await;
    Redirect::to("/")
}

/// Delete a product on the backend.
#[instrument(skip(session))]
pub async fn delete(mut session: RequireUser, Path(id): Path<ProductId>) -> Redirect {
    session.controller.delete_product(id).await;
    Redirect::to("/")
}
