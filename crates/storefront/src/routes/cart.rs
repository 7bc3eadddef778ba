//! Cart route handlers.
//!
//! The cart lives in the visitor's [`Visit`](crate::models::Visit). Mutations answer HTMX requests
//! with a fragment and an `HX-Trigger: cart-updated` header so the count
//! badge can refresh; plain form posts are redirected back to the cart.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use noor_panjabi_core::{Cart, CartLine, ProductId, SHIPPING_FEE};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: u32,
    pub name: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        let product = line.product();
        Self {
            product_id: product.id.get(),
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            quantity: line.quantity(),
            price: product.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub shipping: String,
    pub grand_total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_value().display(),
            shipping: SHIPPING_FEE.display(),
            grand_total: noor_panjabi_core::checkout::grand_total(cart.total_value()).display(),
            item_count: cart.total_count(),
        }
    }
}

/// Add to cart / buy now form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: Chrome,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Answer a cart mutation: fragment for HTMX, redirect otherwise.
fn mutation_response(headers: &HeaderMap, cart: &Cart, fragment: Fragment) -> Response {
    if !super::is_htmx(headers) {
        return Redirect::to("/cart").into_response();
    }

    let trigger = AppendHeaders([("HX-Trigger", "cart-updated")]);
    match fragment {
        Fragment::Count => (
            trigger,
            CartCountTemplate {
                count: cart.total_count(),
            },
        )
            .into_response(),
        Fragment::Items => (
            trigger,
            CartItemsTemplate {
                cart: CartView::from(cart),
            },
        )
            .into_response(),
    }
}

enum Fragment {
    Count,
    Items,
}

/// Display cart page.
#[instrument(skip(visitor))]
pub async fn show(visitor: Visitor) -> Result<impl IntoResponse> {
    let cart = visitor.cart().await;

    Ok(CartShowTemplate {
        chrome: Chrome::new(View::Cart, cart.total_count()),
        cart: CartView::from(&cart),
    })
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, visitor, headers))]
pub async fn add(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown product {}", form.product_id)))?;

    let mut visit = visitor.lock().await;
    visit.cart.add(product);

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    tracing::info!(product_id = %form.product_id, count = visit.cart.total_count(), "Added to cart");

    Ok(mutation_response(&headers, &visit.cart, Fragment::Count))
}

/// Change a line's quantity by a signed delta. Never drops below one.
#[instrument(skip(visitor, headers))]
pub async fn update(
    visitor: Visitor,
    headers: HeaderMap,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let mut visit = visitor.lock().await;
    visit.cart.set_quantity_delta(form.product_id, form.delta);

    Ok(mutation_response(&headers, &visit.cart, Fragment::Items))
}

/// Remove a line from the cart.
#[instrument(skip(visitor, headers))]
pub async fn remove(
    visitor: Visitor,
    headers: HeaderMap,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut visit = visitor.lock().await;
    visit.cart.remove(form.product_id);

    Ok(mutation_response(&headers, &visit.cart, Fragment::Items))
}

/// Put the product in the cart if it is not there yet, then go to checkout.
#[instrument(skip(state, visitor))]
pub async fn buy_now(
    State(state): State<AppState>,
    visitor: Visitor,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::BadRequest(format!("unknown product {}", form.product_id)))?;

    if visitor.lock().await.cart.add_if_absent(product) {
        tracing::info!(product_id = %form.product_id, "Buy now added product");
    }

    Ok(Redirect::to("/checkout"))
}

/// Get cart count badge (HTMX).
#[instrument(skip(visitor))]
pub async fn count(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(CartCountTemplate {
        count: visitor.lock().await.cart.total_count(),
    })
}
