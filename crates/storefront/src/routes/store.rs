//! The store page.
//!
//! Everything the user sees is one page rendered from `&StoreController`:
//! the login gate when logged out, otherwise the catalog, selected product,
//! product forms, cart, checkout forms, and payment section.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use shopfront_core::{Cart, CartLine, CustomerInfo, Price, Product, ShippingInfo};

use crate::controller::{NewProductForm, Notice, NoticeKind, StoreController};
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i64(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.unit_price().display(),
            available: product.availability,
            image_url: product.image_url.clone(),
        }
    }
}

/// Shown in place of a total that overflows.
pub const TOTAL_UNAVAILABLE: &str = "unavailable";

fn display_total(total: Option<Price>) -> String {
    total.map_or_else(|| TOTAL_UNAVAILABLE.to_string(), |price| price.display())
}

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub title: String,
    pub price: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.as_i64(),
            title: line.product.title.clone(),
            price: line.product.unit_price().display(),
            quantity: line.quantity,
            line_price: display_total(line.line_total().map(Price::usd)),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: display_total(cart.subtotal()),
            item_count: cart.item_count(),
        }
    }
}

/// Notice display data for templates.
#[derive(Clone)]
pub struct NoticeView {
    pub class: &'static str,
    pub message: String,
}

impl From<Notice> for NoticeView {
    fn from(notice: Notice) -> Self {
        let class = match notice.kind {
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Info => "notice notice-info",
            NoticeKind::Failure => "notice notice-failure",
        };
        Self {
            class,
            message: notice.message,
        }
    }
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub notice: Option<NoticeView>,
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "store/index.html")]
pub struct StoreTemplate {
    pub username: String,
    pub products: Vec<ProductView>,
    pub selected: Option<ProductView>,
    pub new_product: NewProductForm,
    pub cart: CartView,
    pub customer: CustomerInfo,
    pub shipping: ShippingInfo,
    pub notice: Option<NoticeView>,
}

impl StoreTemplate {
    /// Build the store view for a logged-in user.
    ///
    /// Returns `None` when nobody is logged in.
    #[must_use]
    pub fn from_controller(controller: &StoreController, notice: Option<Notice>) -> Option<Self> {
        let user = controller.user()?;
        Some(Self {
            username: user.username.clone(),
            products: controller.products().iter().map(ProductView::from).collect(),
            selected: controller.selected_product().map(ProductView::from),
            new_product: controller.new_product_form().clone(),
            cart: CartView::from(controller.cart()),
            customer: controller.customer_info().clone(),
            shipping: controller.shipping_info().clone(),
            notice: notice.map(NoticeView::from),
        })
    }
}

/// Render the page for the current controller state.
///
/// The pending notice is consumed, so it is shown exactly once.
pub fn render(controller: &mut StoreController) -> Response {
    let notice = controller.take_notice();
    match StoreTemplate::from_controller(controller, notice.clone()) {
        Some(page) => page.into_response(),
        None => LoginTemplate {
            notice: notice.map(NoticeView::from),
        }
        .into_response(),
    }
}

/// Display the store page (or the login gate).
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Response {
    let mut controller = state.controller().lock().await;
    render(&mut controller)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::ProductId;

    use super::*;

    fn lamp() -> Product {
        Product {
            id: ProductId::new(3),
            title: "Lamp".to_string(),
            description: "Bright".to_string(),
            price: Decimal::new(2050, 2),
            availability: false,
            image_url: Some("/lamp.png".to_string()),
        }
    }

    #[test]
    fn test_product_view() {
        let view = ProductView::from(&lamp());
        assert_eq!(view.id, 3);
        assert_eq!(view.price, "$20.50");
        assert!(!view.available);
        assert_eq!(view.image_url.as_deref(), Some("/lamp.png"));
    }

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::new();
        cart.add(&lamp());
        cart.add(&lamp());

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 2);
        assert_eq!(view.items[0].line_price, "$41.00");
        assert_eq!(view.subtotal, "$41.00");
        assert_eq!(view.item_count, 2);
    }

    #[test]
    fn test_cart_view_overflowing_total() {
        let mut cart = Cart::new();
        let yacht = Product {
            price: Decimal::from_scientific("1e20").unwrap(),
            ..lamp()
        };
        cart.add(&yacht);
        cart.set_quantity(yacht.id, 4_000_000_000).unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.items[0].line_price, TOTAL_UNAVAILABLE);
        assert_eq!(view.subtotal, TOTAL_UNAVAILABLE);
        assert_eq!(view.item_count, 4_000_000_000);
    }

    #[test]
    fn test_notice_view_classes() {
        let view = NoticeView::from(Notice {
            kind: NoticeKind::Failure,
            message: "nope".to_string(),
        });
        assert_eq!(view.class, "notice notice-failure");
        assert_eq!(view.message, "nope");
    }

    #[test]
    fn test_login_template_renders_form() {
        let html = LoginTemplate { notice: None }.render().unwrap();
        assert!(html.contains("action=\"/auth/login\""));
        assert!(html.contains("name=\"username\""));
        assert!(html.contains("type=\"password\""));
    }

    #[test]
    fn test_store_template_escapes_titles() {
        let page = StoreTemplate {
            username: "ada".to_string(),
            products: vec![ProductView {
                title: "<b>Bold</b>".to_string(),
                ..ProductView::from(&lamp())
            }],
            selected: None,
            new_product: NewProductForm::default(),
            cart: CartView::from(&Cart::new()),
            customer: CustomerInfo::default(),
            shipping: ShippingInfo::default(),
            notice: None,
        };
        let html = page.render().unwrap();
        assert!(html.contains("Welcome, ada!"));
        assert!(html.contains("Bold"));
        assert!(!html.contains("<b>Bold</b>"));
        assert!(!html.contains("Product Details"));
    }
}
