//! Integration tests for store controller flows against a live mock backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use rust_decimal::Decimal;
use secrecy::SecretString;

use shopfront_core::{CartError, CustomerInfo, ProductId, ShippingInfo};
use shopfront_integration_tests::{MockBackend, product, sample_catalog, temp_storage_path};
use shopfront_storefront::controller::{NewProductForm, NoticeKind, StoreController};
use shopfront_storefront::models::LoginCredentials;
use shopfront_storefront::storage::LocalStorage;

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        address: "1 Loop Rd".to_string(),
    }
}

fn shipping() -> ShippingInfo {
    ShippingInfo {
        address: "1 Loop Rd".to_string(),
        city: "Springfield".to_string(),
        zip: "12345".to_string(),
        country: "US".to_string(),
    }
}

async fn controller_with_widget_in_cart(backend: &MockBackend) -> StoreController {
    let mut controller = backend.controller();
    assert!(controller.fetch_products().await);
    assert!(controller.select_product(ProductId::new(1)));
    assert!(controller.add_to_cart());
    controller
}

#[tokio::test]
async fn test_fetch_replaces_catalog() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = backend.controller();

    assert!(controller.fetch_products().await);
    assert_eq!(controller.products(), sample_catalog().as_slice());

    backend.set_products(vec![product(9, "Lamp", Decimal::ONE)]);
    assert!(controller.fetch_products().await);
    assert_eq!(controller.products().len(), 1);
    assert_eq!(controller.products()[0].id, ProductId::new(9));
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_catalog() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = backend.controller();
    controller.fetch_products().await;

    backend.fail_with(StatusCode::INTERNAL_SERVER_ERROR);

    assert!(!controller.fetch_products().await);
    assert_eq!(controller.products(), sample_catalog().as_slice());
}

#[tokio::test]
async fn test_add_same_product_twice() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;

    assert!(controller.add_to_cart());

    let lines = controller.cart().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product.id, ProductId::new(1));
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(controller.cart().subtotal().unwrap().display(), "$20.00");
}

#[tokio::test]
async fn test_quantity_below_one_is_rejected() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;

    let err = controller.update_quantity(ProductId::new(1), 0).unwrap_err();

    assert_eq!(err, CartError::InvalidQuantity(0));
    assert_eq!(controller.cart().lines()[0].quantity, 1);

    controller.update_quantity(ProductId::new(1), 5).unwrap();
    assert_eq!(controller.cart().lines()[0].quantity, 5);
}

#[tokio::test]
async fn test_remove_and_clear_cart() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;
    controller.select_product(ProductId::new(2));
    controller.add_to_cart();

    assert!(controller.remove_from_cart(ProductId::new(1)));
    assert!(!controller.remove_from_cart(ProductId::new(1)));
    assert_eq!(controller.cart().len(), 1);

    controller.clear_cart();
    assert!(controller.cart().is_empty());
}

#[tokio::test]
async fn test_place_order_success_clears_checkout_state() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;
    controller.update_customer_info(customer());
    controller.update_shipping_info(shipping());
    let fetches_before = backend.state().list_calls;

    assert!(controller.place_order().await);

    assert!(controller.cart().is_empty());
    assert_eq!(controller.customer_info(), &CustomerInfo::default());
    assert_eq!(controller.shipping_info(), &ShippingInfo::default());
    assert_eq!(controller.notice().unwrap().kind, NoticeKind::Success);

    let state = backend.state();
    assert_eq!(state.list_calls, fetches_before + 1);
    assert_eq!(state.orders.len(), 1);
    assert_eq!(state.orders[0]["customer"]["email"], "ada@example.com");
    assert_eq!(state.orders[0]["products"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_place_order_failure_keeps_checkout_state() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;
    controller.update_customer_info(customer());
    controller.update_shipping_info(shipping());
    backend.fail_with(StatusCode::SERVICE_UNAVAILABLE);

    assert!(!controller.place_order().await);

    assert_eq!(controller.cart().item_count(), 1);
    assert_eq!(controller.customer_info(), &customer());
    assert_eq!(controller.shipping_info(), &shipping());
    assert_eq!(controller.notice().unwrap().kind, NoticeKind::Failure);
}

#[tokio::test]
async fn test_create_product_resets_form_and_refetches() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = backend.controller();
    controller.fetch_products().await;

    controller.update_new_product(NewProductForm {
        title: "Lamp".to_string(),
        description: "Bright".to_string(),
        price: "20.50".to_string(),
        availability: true,
    });

    assert!(controller.create_product().await);

    assert_eq!(controller.new_product_form(), &NewProductForm::default());
    assert_eq!(controller.products().len(), 3);
    assert_eq!(controller.products()[2].title, "Lamp");
    assert_eq!(backend.state().created[0]["price"], 20.5);
}

#[tokio::test]
async fn test_create_product_failure_keeps_form() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = backend.controller();
    let form = NewProductForm {
        title: "Lamp".to_string(),
        price: "3".to_string(),
        ..NewProductForm::default()
    };
    controller.update_new_product(form.clone());
    backend.fail_with(StatusCode::UNAUTHORIZED);

    assert!(!controller.create_product().await);
    assert_eq!(controller.new_product_form(), &form);
}

#[tokio::test]
async fn test_create_product_with_bad_price_is_not_sent() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = backend.controller();
    controller.update_new_product(NewProductForm {
        title: "Lamp".to_string(),
        price: "cheap".to_string(),
        ..NewProductForm::default()
    });

    assert!(!controller.create_product().await);
    assert!(backend.state().created.is_empty());
}

#[tokio::test]
async fn test_delete_product_leaves_local_state() {
    let backend = MockBackend::start(sample_catalog()).await;
    let mut controller = controller_with_widget_in_cart(&backend).await;

    assert!(controller.delete_product(ProductId::new(1)).await);

    assert_eq!(backend.state().deleted, vec![1]);
    assert_eq!(controller.products().len(), 2);
    assert_eq!(controller.selected_product().unwrap().id, ProductId::new(1));
    assert_eq!(controller.cart().item_count(), 1);
}

#[tokio::test]
async fn test_login_persists_across_controllers() {
    let backend = MockBackend::start(Vec::new()).await;
    let path = temp_storage_path();

    let mut controller =
        StoreController::new(backend.client(), LocalStorage::open(&path).unwrap());
    controller
        .login(&LoginCredentials {
            username: " ada ".to_string(),
            password: SecretString::from("secret"),
        })
        .unwrap();

    let restored = StoreController::new(backend.client(), LocalStorage::open(&path).unwrap());
    let user = restored.user().unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(user.email, shopfront_core::PLACEHOLDER_EMAIL);

    let mut restored = restored;
    restored.logout().unwrap();
    let after_logout = StoreController::new(backend.client(), LocalStorage::open(&path).unwrap());
    assert!(after_logout.user().is_none());
}

#[tokio::test]
async fn test_failed_login_leaves_nothing_stored() {
    let backend = MockBackend::start(Vec::new()).await;
    let path = temp_storage_path();
    let mut controller =
        StoreController::new(backend.client(), LocalStorage::open(&path).unwrap());

    // Storage directory replaced by a plain file: every write fails
    let dir = path.parent().unwrap();
    std::fs::write(dir, "").unwrap();

    let credentials = LoginCredentials {
        username: "ada".to_string(),
        password: SecretString::from("secret"),
    };
    assert!(controller.login(&credentials).is_err());
    assert!(controller.user().is_none());

    // Nothing half-written, so logging out while logged out still succeeds
    controller.logout().unwrap();

    let _ = std::fs::remove_file(dir);
}
