//! Cart route handlers.
//!
//! The cart lives in the controller; these handlers translate form posts
//! into cart operations and send the browser back to the store page.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::ProductId;

use crate::error::Result;
use crate::middleware::RequireUser;

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: ProductId,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: ProductId,
}

/// Add the selected product to the cart.
#[instrument(skip(session))]
pub async fn add(mut session: RequireUser) -> Redirect {
    if !session.controller.add_to_cart() {
        tracing::debug!("Add to cart without a selected product");
    }
    Redirect::to("/")
}

/// Update a cart line's quantity.
///
/// # Errors
///
/// Returns `AppError::Cart` if the quantity is below 1 or too large.
#[instrument(skip(session))]
pub async fn update(
    mut session: RequireUser,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    session.controller.update_quantity(form.id, form.quantity)?;
    Ok(Redirect::to("/"))
}

/// Remove a cart line.
#[instrument(skip(session))]
pub async fn remove(mut session: RequireUser, Form(form): Form<RemoveFromCartForm>) -> Redirect {
    session.controller.remove_from_cart(form.id);
    Redirect::to("/")
}
