//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use noor_panjabi_core::catalog::{CATEGORIES, Category};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};
use crate::routes::products::ProductCard;
use crate::state::AppState;

/// Number of products in the home page grid.
const FEATURED_PRODUCTS: usize = 4;

/// A customer testimonial.
pub struct Testimonial {
    pub name: &'static str,
    pub rating: u8,
    pub comment: &'static str,
    pub date: &'static str,
}

impl Testimonial {
    /// Filled stars for the rating, out of five.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// Static testimonials shown on the homepage.
pub const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Arifur Rahman",
        rating: 5,
        comment: "The fabric quality is outstanding. Wore it for my sister's wedding and received so many compliments!",
        date: "2 weeks ago",
    },
    Testimonial {
        name: "Salman Khan",
        rating: 4,
        comment: "Great fitting and very comfortable for the humid weather in Dhaka. Delivery was fast too.",
        date: "1 month ago",
    },
];

/// A selling point in the trust bar.
pub struct Promise {
    pub label: &'static str,
    pub detail: &'static str,
}

const PROMISES: &[Promise] = &[
    Promise {
        label: "Elite Quality",
        detail: "100% Pure Fabric",
    },
    Promise {
        label: "Pay on Arrival",
        detail: "Nationwide Delivery",
    },
    Promise {
        label: "Swift Transit",
        detail: "Within 24-48 Hours",
    },
    Promise {
        label: "Master Cut",
        detail: "Tailored to Perfection",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub categories: &'static [Category],
    pub featured: Vec<ProductCard>,
    pub promises: &'static [Promise],
    pub testimonials: &'static [Testimonial],
}

/// Display the home page.
#[instrument(skip(state, visitor))]
pub async fn home(State(state): State<AppState>, visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(HomeTemplate {
        chrome: super::chrome(&visitor, View::Home).await,
        categories: CATEGORIES,
        featured: state
            .catalog()
            .featured(FEATURED_PRODUCTS)
            .into_iter()
            .map(ProductCard::from)
            .collect(),
        promises: PROMISES,
        testimonials: TESTIMONIALS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(TESTIMONIALS[0].stars(), "★★★★★");
        assert_eq!(TESTIMONIALS[1].stars(), "★★★★☆");
    }
}
