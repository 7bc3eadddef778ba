//! Checkout route handlers.
//!
//! `POST /checkout` renders the outcome directly instead of redirecting, so
//! the receipt is shown exactly once. Reloading `/checkout` afterwards starts
//! a fresh form against whatever is left in the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noor_panjabi_core::checkout::{District, settle};
use noor_panjabi_core::{Cart, CheckoutError, CheckoutState, Order, ShippingDetails};
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};
use crate::routes::cart::{CartItemView, CartView};
use crate::services::place_order;
use crate::state::AppState;

/// Shipping form data, echoed back into the form on errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub district: String,
}

/// A district choice in the shipping form.
pub struct DistrictOption {
    pub name: &'static str,
    pub selected: bool,
}

/// Checkout form page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/form.html")]
pub struct CheckoutFormTemplate {
    pub chrome: Chrome,
    pub cart: CartView,
    pub districts: Vec<DistrictOption>,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

/// Receipt display data.
pub struct ReceiptView {
    pub number: String,
    pub recipient_name: String,
    pub mobile: String,
    pub address: String,
    pub district: String,
    pub payment: String,
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub grand_total: String,
}

impl From<&Order> for ReceiptView {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.to_string(),
            recipient_name: order.shipping.recipient_name.clone(),
            mobile: order.shipping.mobile.clone(),
            address: order.shipping.address.clone(),
            district: order.shipping.district.to_string(),
            payment: order.shipping.payment.to_string(),
            items: order.lines.iter().map(CartItemView::from).collect(),
            subtotal: order.subtotal.display(),
            shipping: order.shipping_fee.display(),
            grand_total: order.grand_total.display(),
        }
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmed.html")]
pub struct CheckoutConfirmedTemplate {
    pub chrome: Chrome,
    pub receipt: ReceiptView,
}

fn form_page(cart: &Cart, form: CheckoutForm, error: Option<String>) -> CheckoutFormTemplate {
    CheckoutFormTemplate {
        chrome: Chrome::new(View::Checkout, cart.total_count()),
        cart: CartView::from(cart),
        districts: District::ALL
            .iter()
            .map(|d| DistrictOption {
                name: d.as_str(),
                selected: d.as_str().eq_ignore_ascii_case(form.district.trim()),
            })
            .collect(),
        form,
        error,
    }
}

/// Display the shipping form.
#[instrument(skip(visitor))]
pub async fn show(visitor: Visitor) -> Response {
    let cart = visitor.cart().await;
    render(&cart, CheckoutState::Form, CheckoutForm::default())
}

/// Place the order.
///
/// Invalid input re-renders the form with a 422. The order is built from a
/// snapshot of the cart and the visit is not locked while the order desk
/// answers, so the cart stays usable from other tabs. An order desk failure
/// re-renders the form with the reason and leaves the cart untouched.
#[instrument(skip(state, visitor, form), fields(district = %form.district))]
pub async fn submit(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let snapshot = visitor.cart().await;

    let order = match build_order(&snapshot, &form) {
        Ok(order) => order,
        Err(e) => {
            let page = form_page(&snapshot, form, Some(capitalize(&e.to_string())));
            return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
        }
    };

    let outcome = place_order(state.order_desk(), &order).await.map(|_| ());
    if let Err(e) = &outcome {
        tracing::warn!(error = %e, order_id = %order.id, "Order desk failed");
    }

    let mut visit = visitor.lock().await;
    let checkout = settle(&mut visit.cart, order, outcome);
    if let CheckoutState::Confirmed(order) = &checkout {
        add_breadcrumb("checkout", "Order placed", None);
        tracing::info!(
            order_id = %order.id,
            number = %order.number,
            grand_total = %order.grand_total,
            left_in_cart = visit.cart.total_count(),
            "Order confirmed"
        );
    }
    render(&visit.cart, checkout, form)
}

/// Render the page for `checkout` against the live `cart`.
fn render(cart: &Cart, checkout: CheckoutState, form: CheckoutForm) -> Response {
    match checkout {
        CheckoutState::Form => form_page(cart, form, None).into_response(),
        CheckoutState::Confirmed(order) => CheckoutConfirmedTemplate {
            chrome: Chrome::new(View::Checkout, cart.total_count()).titled("Order Confirmed"),
            receipt: ReceiptView::from(order.as_ref()),
        }
        .into_response(),
        CheckoutState::Failed { reason } => {
            let message = format!("We could not place your order: {reason}. Please try again.");
            form_page(cart, form, Some(message)).into_response()
        }
    }
}

fn build_order(cart: &Cart, form: &CheckoutForm) -> std::result::Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let shipping = ShippingDetails::new(&form.name, &form.mobile, &form.address, &form.district)?;
    Order::from_cart(cart, shipping)
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
