//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use noor_panjabi_core::catalog::{ALL_CATEGORIES, CATEGORIES, category_by_slug};
use noor_panjabi_core::{Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};
use crate::state::AppState;

/// How many related products the detail page shows.
const RELATED_LIMIT: usize = 3;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductCard {
    pub id: u32,
    pub name: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u64>,
    pub category: String,
    pub image: String,
    pub badge: Option<String>,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name.clone(),
            price: product.price.display(),
            original_price: product
                .original_price
                .filter(|original| *original > product.price)
                .map(|p| p.display()),
            discount_percent: product.discount_percent(),
            category: product.category.clone(),
            image: product.image.clone(),
            badge: product.badge.clone(),
        }
    }
}

/// One entry in the category filter bar.
pub struct FilterChip {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Shop query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    /// Category label or slug. Missing or unknown means all products.
    pub category: Option<String>,
}

/// Resolve a `category` query value to a category label.
fn resolve_category(raw: Option<&str>) -> &'static str {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return ALL_CATEGORIES;
    };
    category_by_slug(raw)
        .or_else(|| CATEGORIES.iter().find(|c| c.name.eq_ignore_ascii_case(raw)))
        .map_or(ALL_CATEGORIES, |c| c.name)
}

fn filter_chips(active: &str) -> Vec<FilterChip> {
    let mut chips = vec![FilterChip {
        label: ALL_CATEGORIES,
        href: "/shop".to_string(),
        active: active == ALL_CATEGORIES,
    }];
    chips.extend(CATEGORIES.iter().map(|c| FilterChip {
        label: c.name,
        href: format!("/shop?category={}", c.slug),
        active: active == c.name,
    }));
    chips
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: Chrome,
    pub category: &'static str,
    pub chips: Vec<FilterChip>,
    pub products: Vec<ProductCard>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub chrome: Chrome,
    pub product: ProductCard,
    pub in_cart: u32,
    pub related_products: Vec<ProductCard>,
}

/// Display product listing page.
#[instrument(skip(state, visitor))]
pub async fn index(
    State(state): State<AppState>,
    visitor: Visitor,
    Query(query): Query<ShopQuery>,
) -> Result<impl IntoResponse> {
    let category = resolve_category(query.category.as_deref());
    let products = state
        .catalog()
        .by_category(category)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    Ok(ProductsIndexTemplate {
        chrome: super::chrome(&visitor, View::Shop).await,
        category,
        chips: filter_chips(category),
        products,
    })
}

/// Display product detail page.
#[instrument(skip(state, visitor))]
pub async fn show(
    State(state): State<AppState>,
    visitor: Visitor,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let cart = visitor.cart().await;
    let in_cart = cart.line(product.id).map_or(0, |line| line.quantity());

    let related_products = state
        .catalog()
        .related(product, RELATED_LIMIT)
        .into_iter()
        .map(ProductCard::from)
        .collect();

    Ok(ProductShowTemplate {
        chrome: Chrome::new(View::ProductDetails, cart.total_count()).titled(product.name.clone()),
        product: ProductCard::from(product),
        in_cart,
        related_products,
    })
}

#[cfg(test)]
mod tests {
    use noor_panjabi_core::catalog::bundled_products;

    use super::*;

    #[test]
    fn test_resolve_category() {
        assert_eq!(resolve_category(None), ALL_CATEGORIES);
        assert_eq!(resolve_category(Some("")), ALL_CATEGORIES);
        assert_eq!(resolve_category(Some("wedding")), "Wedding Panjabi");
        assert_eq!(resolve_category(Some("casual panjabi")), "Casual Panjabi");
        assert_eq!(resolve_category(Some("winter")), ALL_CATEGORIES);
    }

    #[test]
    fn test_filter_chips_mark_active() {
        let chips = filter_chips("New Arrival");
        assert_eq!(chips.len(), CATEGORIES.len() + 1);
        let active: Vec<_> = chips.iter().filter(|c| c.active).map(|c| c.label).collect();
        assert_eq!(active, vec!["New Arrival"]);
        assert_eq!(chips[4].href, "/shop?category=new");
    }

    #[test]
    fn test_product_card_formats_prices() {
        let card = ProductCard::from(&bundled_products()[0]);
        assert_eq!(card.price, "৳3,450");
        assert_eq!(card.original_price.as_deref(), Some("৳4,200"));
        assert_eq!(card.discount_percent, Some(17));

        let plain = ProductCard::from(&bundled_products()[1]);
        assert!(plain.original_price.is_none());
        assert_eq!(plain.badge.as_deref(), Some("Premium"));
    }
}
