//! The store controller.
//!
//! One [`StoreController`] owns every piece of view state: the catalog, the
//! selected product, the cart, the checkout and product-creation forms, the
//! simulated session, and the pending notice. Route handlers call one
//! operation per UI event and then render from `&StoreController`.
//!
//! Network failures never propagate out of these operations. They are logged
//! and the prior state is kept; only order placement and payment selection
//! leave a [`Notice`] for the user.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use shopfront_core::{
    Cart, CartError, CustomerInfo, NewProduct, Order, Product, ProductId, SessionUser,
    ShippingInfo,
};

use crate::api::CatalogClient;
use crate::error::add_breadcrumb;
use crate::models::{LoginCredentials, storage_keys};
use crate::storage::{LocalStorage, LocalStorageError};

/// Message shown when the payment button is pressed.
pub const PAYMENT_PLACEHOLDER_MESSAGE: &str =
    "Initiating payment. This is a placeholder and should be handled securely on the server.";

// =============================================================================
// Forms and Notices
// =============================================================================

/// Errors turning a form into a request payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("invalid price '{0}'")]
    InvalidPrice(String),
}

/// The "create new product" form as typed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProductForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub availability: bool,
}

impl Default for NewProductForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            availability: true,
        }
    }
}

impl NewProductForm {
    /// Build the creation payload.
    ///
    /// # Errors
    ///
    /// Returns `FormError::InvalidPrice` if the price is not a decimal number.
    pub fn to_payload(&self) -> Result<NewProduct, FormError> {
        let price = Decimal::from_str(self.price.trim())
            .map_err(|_| FormError::InvalidPrice(self.price.clone()))?;

        Ok(NewProduct {
            title: self.title.clone(),
            description: self.description.clone(),
            price,
            availability: self.availability,
        })
    }
}

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Failure,
}

/// A one-shot message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

// =============================================================================
// StoreController
// =============================================================================

/// Owner of all storefront view state.
pub struct StoreController {
    client: CatalogClient,
    storage: LocalStorage,
    products: Vec<Product>,
    selected: Option<Product>,
    cart: Cart,
    new_product: NewProductForm,
    customer: CustomerInfo,
    shipping: ShippingInfo,
    user: Option<SessionUser>,
    notice: Option<Notice>,
}

impl StoreController {
    /// Create a controller, restoring any stored session user.
    ///
    /// The catalog starts empty; call [`Self::fetch_products`] to load it.
    #[must_use]
    pub fn new(client: CatalogClient, storage: LocalStorage) -> Self {
        let user = match storage.get_json::<SessionUser>(storage_keys::AUTHENTICATED_USER) {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored user");
                None
            }
        };

        if let Some(user) = &user {
            tracing::info!(username = %user.username, "Restored stored session user");
        }

        Self {
            client,
            storage,
            products: Vec::new(),
            selected: None,
            cart: Cart::new(),
            new_product: NewProductForm::default(),
            customer: CustomerInfo::default(),
            shipping: ShippingInfo::default(),
            user,
            notice: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn selected_product(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn new_product_form(&self) -> &NewProductForm {
        &self.new_product
    }

    #[must_use]
    pub const fn customer_info(&self) -> &CustomerInfo {
        &self.customer
    }

    #[must_use]
    pub const fn shipping_info(&self) -> &ShippingInfo {
        &self.shipping
    }

    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Remove and return the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Reload the catalog from the backend.
    ///
    /// Returns whether the catalog was replaced. On failure the error is
    /// logged and the previous product list stays in place.
    #[instrument(skip(self))]
    pub async fn fetch_products(&mut self) -> bool {
        match self.client.list_products().await {
            Ok(products) => {
                tracing::info!(count = products.len(), "Catalog refreshed");
                self.products = products;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching products");
                false
            }
        }
    }

    /// Select a product from the current catalog.
    ///
    /// Unknown ids clear the selection. Returns whether a product is now
    /// selected.
    pub fn select_product(&mut self, id: ProductId) -> bool {
        self.selected = self.products.iter().find(|p| p.id == id).cloned();
        self.selected.is_some()
    }

    /// Replace the product creation form contents.
    pub fn update_new_product(&mut self, form: NewProductForm) {
        self.new_product = form;
    }

    /// Create a product from the creation form.
    ///
    /// On success the form is reset and the catalog re-fetched. Failures,
    /// including an unparseable price, are only logged.
    #[instrument(skip(self), fields(title = %self.new_product.title))]
    pub async fn create_product(&mut self) -> bool {
        let payload = match self.new_product.to_payload() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Not creating product");
                return false;
            }
        };

        match self.client.create_product(&payload).await {
            Ok(created) => {
                tracing::info!(
                    product_id = ?created.as_ref().map(|p| p.id),
                    "Product created successfully"
                );
                self.new_product = NewProductForm::default();
                self.fetch_products().await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating product");
                false
            }
        }
    }

    /// Delete a product on the backend.
    ///
    /// Only logs the outcome; the local catalog, selection, and cart are not
    /// touched.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> bool {
        match self.client.delete_product(id).await {
            Ok(()) => {
                tracing::info!(product_id = %id, "Product deleted successfully");
                true
            }
            Err(e) => {
                tracing::error!(product_id = %id, error = %e, "Error deleting product");
                false
            }
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of the selected product. No-op without a selection.
    ///
    /// The selection is kept, so adding again increments the same line.
    pub fn add_to_cart(&mut self) -> bool {
        let Some(product) = &self.selected else {
            return false;
        };

        self.cart.add(product);
        let product_id = product.id.to_string();
        add_breadcrumb(
            "cart",
            "Added product to cart",
            Some(&[("product_id", product_id.as_str())]),
        );
        true
    }

    /// Overwrite a cart line's quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` for quantities below 1 and
    /// `CartError::QuantityTooLarge` above `u32::MAX`; the line keeps its
    /// previous quantity.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), CartError> {
        self.cart.set_quantity(id, quantity).inspect_err(|e| {
            tracing::warn!(product_id = %id, error = %e, "Rejected quantity update");
        })
    }

    /// Remove a cart line. No-op if absent.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove(id)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn update_customer_info(&mut self, customer: CustomerInfo) {
        self.customer = customer;
    }

    pub fn update_shipping_info(&mut self, shipping: ShippingInfo) {
        self.shipping = shipping;
    }

    /// Submit the cart with the checkout forms as an order.
    ///
    /// On success the catalog is re-fetched and the cart, customer, and
    /// shipping state are cleared. On failure everything is left as it was.
    /// Either way a notice is left for the user.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn place_order(&mut self) -> bool {
        let order = Order::from_parts(&self.customer, &self.cart, &self.shipping);
        tracing::info!(items = self.cart.item_count(), "Placing order");

        match self.client.place_order(&order).await {
            Ok(confirmation) => {
                tracing::info!(confirmation = %confirmation, "Order placed");
                add_breadcrumb("checkout", "Order placed", None);

                self.fetch_products().await;
                self.cart.clear();
                self.customer = CustomerInfo::default();
                self.shipping = ShippingInfo::default();
                self.notice = Some(Notice::new(
                    NoticeKind::Success,
                    "Your order has been placed.",
                ));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error placing order");
                self.notice = Some(Notice::new(
                    NoticeKind::Failure,
                    "We couldn't place your order. Please try again.",
                ));
                false
            }
        }
    }

    /// Payment is not implemented; leave a notice saying so.
    pub fn initiate_payment(&mut self) {
        tracing::info!("Payment requested (placeholder)");
        self.notice = Some(Notice::new(NoticeKind::Info, PAYMENT_PLACEHOLDER_MESSAGE));
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Simulated login: fabricate a user and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be written to local storage. The
    /// user stays logged out in that case.
    pub fn login(
        &mut self,
        credentials: &LoginCredentials,
    ) -> Result<&SessionUser, LocalStorageError> {
        let user = SessionUser::simulated(credentials.username.trim());
        self.storage.set_json(storage_keys::AUTHENTICATED_USER, &user)?;

        tracing::info!(username = %user.username, "User logged in");
        Ok(self.user.insert(user))
    }

    /// Forget the session user.
    ///
    /// # Errors
    ///
    /// Returns an error if local storage cannot be updated. The in-memory
    /// user is cleared regardless.
    pub fn logout(&mut self) -> Result<(), LocalStorageError> {
        if let Some(user) = self.user.take() {
            tracing::info!(username = %user.username, "User logged out");
        }
        self.storage.remove_item(storage_keys::AUTHENTICATED_USER)
    }
}
