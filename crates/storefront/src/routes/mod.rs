//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//! GET  /health/ready           - Readiness check
//!
//! # Products
//! GET  /shop?category=<label>  - Product listing with category filter
//! GET  /products/{id}          - Product detail with related products
//!
//! # Cart (HTMX fragments when HX-Request is set, redirects otherwise)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add one unit
//! POST /cart/update            - Change quantity by a delta
//! POST /cart/remove            - Remove a line
//! POST /cart/buy-now           - Add if absent, then go to checkout
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Shipping form
//! POST /checkout               - Place order (confirmation or failure)
//!
//! # Style consultant
//! GET  /chat                   - Transcript
//! POST /chat                   - Send a message
//!
//! # Pages
//! GET  /about, /returns, /size-guide, /quality
//! GET  /contact                - Contact form
//! POST /contact                - Submit contact form
//! GET  /order-status           - Tracking form
//! POST /order-status           - Look up an order
//!
//! # JSON API
//! GET  /api/products           - Product list
//! POST /api/orders             - Place an order payload
//! POST /api/chat               - Ask the style consultant
//! ```

pub mod api;
pub mod cart;
pub mod chat;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{
    api_rate_limiter, chat_rate_limiter, create_session_layer, request_id_middleware,
    security_headers_middleware, Visitor,
};
use crate::models::{Chrome, View};
use crate::state::AppState;

/// Directory static assets are served from.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Header HTMX sets on its requests.
const HX_REQUEST: &str = "hx-request";

/// Whether the request came from HTMX and wants a fragment back.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key(HX_REQUEST)
}

/// Page chrome for `view`, with the visitor's current cart count.
pub(crate) async fn chrome(visitor: &Visitor, view: View) -> Chrome {
    Chrome::new(view, visitor.lock().await.cart.total_count())
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/buy-now", post(cart::buy_now))
        .route("/count", get(cart::count))
}

/// Create the chat routes router.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::show).post(chat::send))
        .layer(chat_rate_limiter())
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    let chat = Router::new()
        .route("/chat", post(api::chat))
        .layer(chat_rate_limiter());

    Router::new()
        .route("/products", get(api::products))
        .route("/orders", post(api::orders))
        .layer(api_rate_limiter())
        .merge(chat)
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(products::index))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .nest("/chat", chat_routes())
        .route("/about", get(pages::about))
        .route("/returns", get(pages::returns))
        .route("/size-guide", get(pages::size_guide))
        .route("/quality", get(pages::quality))
        .route(
            "/order-status",
            get(pages::order_status).post(pages::track_order),
        )
        .route("/contact", get(contact::show).post(contact::submit))
        .nest("/api", api_routes())
}

/// Build the complete application: routes, static files, and middleware.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Ready once a non-empty catalog is loaded, which is always true after
/// startup since the bundled collection backs a failed fetch.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
