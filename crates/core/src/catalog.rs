//! The loaded product catalog and the bundled fallback collection.
//!
//! [`bundled_products`] is the fixed list shipped with the binary. It is what
//! visitors see whenever the catalog feed is unreachable, so it must stay
//! non-empty and deterministic.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{Price, Product, ProductId};

/// Filter value that matches every category.
pub const ALL_CATEGORIES: &str = "All";

/// A shop category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Label as it appears on products.
    pub name: &'static str,
    /// URL-friendly identifier.
    pub slug: &'static str,
}

/// Categories shown in the shop filter bar, in display order.
pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Eid Collection",
        slug: "eid",
    },
    Category {
        name: "Wedding Panjabi",
        slug: "wedding",
    },
    Category {
        name: "Casual Panjabi",
        slug: "casual",
    },
    Category {
        name: "New Arrival",
        slug: "new",
    },
];

/// Look up a category by slug.
#[must_use]
pub fn category_by_slug(slug: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.slug == slug)
}

fn bundled(
    id: u32,
    name: &str,
    price: u64,
    original_price: Option<u64>,
    category: &str,
    badge: Option<&str>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::new(price),
        original_price: original_price.map(Price::new),
        category: category.to_string(),
        image: format!("https://picsum.photos/seed/panjabi{id}/600/800"),
        badge: badge.map(String::from),
    }
}

/// The catalog shipped with the storefront.
#[must_use]
pub fn bundled_products() -> Vec<Product> {
    vec![
        bundled(
            1,
            "Classic Cream Silk Panjabi",
            3450,
            Some(4200),
            "Eid Collection",
            Some("Best Seller"),
        ),
        bundled(
            2,
            "Deep Emerald Embroidery",
            5200,
            None,
            "Wedding Panjabi",
            Some("Premium"),
        ),
        bundled(
            3,
            "Midnight Black Minimalist",
            2800,
            Some(3200),
            "Casual Panjabi",
            None,
        ),
        bundled(
            4,
            "Royal Blue Sultan Cut",
            4800,
            None,
            "New Arrival",
            Some("New"),
        ),
        bundled(
            5,
            "Off-White Cotton Comfort",
            2200,
            None,
            "Casual Panjabi",
            None,
        ),
        bundled(
            6,
            "Golden Zardosi Wedding Set",
            8500,
            None,
            "Wedding Panjabi",
            Some("Exclusive"),
        ),
    ]
}

/// Where the loaded catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// Records returned by the catalog provider.
    Provider,
    /// The bundled list, used because the provider failed or returned nothing usable.
    Fallback,
}

/// Why a fetched record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectedProduct {
    #[error("product {0} has a zero price")]
    ZeroPrice(ProductId),
    #[error("product id {0} appears more than once")]
    DuplicateId(ProductId),
}

/// The products on sale for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    source: CatalogSource,
}

impl Catalog {
    /// Build a catalog from fetched records.
    ///
    /// Records with a zero price and repeats of an already-seen id are
    /// dropped and reported. If nothing valid remains, the bundled list is
    /// used instead.
    #[must_use]
    pub fn from_fetched(fetched: Vec<Product>) -> (Self, Vec<RejectedProduct>) {
        let mut seen = HashSet::new();
        let mut rejected = Vec::new();
        let mut products = Vec::with_capacity(fetched.len());

        for product in fetched {
            if product.price.is_zero() {
                rejected.push(RejectedProduct::ZeroPrice(product.id));
            } else if !seen.insert(product.id) {
                rejected.push(RejectedProduct::DuplicateId(product.id));
            } else {
                products.push(product);
            }
        }

        if products.is_empty() {
            return (Self::fallback(), rejected);
        }

        (
            Self {
                products,
                source: CatalogSource::Provider,
            },
            rejected,
        )
    }

    /// The bundled catalog.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            products: bundled_products(),
            source: CatalogSource::Fallback,
        }
    }

    /// Where these products came from.
    #[must_use]
    pub const fn source(&self) -> CatalogSource {
        self.source
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in `category`, or every product for [`ALL_CATEGORIES`].
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        if category == ALL_CATEGORIES {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Up to `limit` other products from the same category as `product`.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// The first `limit` products, for the home page.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().take(limit).collect()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty. Never true for a loaded catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
