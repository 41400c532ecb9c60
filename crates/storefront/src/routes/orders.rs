//! Checkout and payment route handlers.

use axum::{Form, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use shopfront_core::{CustomerInfo, ShippingInfo};

use crate::middleware::RequireUser;

/// Checkout form data: customer and shipping sections in one post.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_zip: String,
    pub shipping_country: String,
}

impl CheckoutForm {
    fn customer(&self) -> CustomerInfo {
        CustomerInfo {
            name: self.customer_name.clone(),
            email: self.customer_email.clone(),
            address: self.customer_address.clone(),
        }
    }

    fn shipping(&self) -> ShippingInfo {
        ShippingInfo {
            address: self.shipping_address.clone(),
            city: self.shipping_city.clone(),
            zip: self.shipping_zip.clone(),
            country: self.shipping_country.clone(),
        }
    }
}

/// Save the checkout forms and place the order.
///
/// The controller leaves a success or failure notice for the next render.
#[instrument(skip(session, form))]
pub async fn place(mut session: RequireUser, Form(form): Form<CheckoutForm>) -> Redirect {
    let controller = &mut session.controller;
    controller.update_customer_info(form.customer());
    controller.update_shipping_info(form.shipping());
    controller.place_order().await;
    Redirect::to("/")
}

/// Payment placeholder.
#[instrument(skip(session))]
pub async fn payment(mut session: RequireUser) -> Redirect {
    session.controller.initiate_payment();
    Redirect::to("/")
}
