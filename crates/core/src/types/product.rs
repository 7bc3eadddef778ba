//! Product records as supplied by the catalog.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the catalog.
///
/// Serialized with camelCase field names (`originalPrice`) so the same shape
/// is accepted from a remote catalog feed and served from `/api/products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Selling price per unit.
    pub price: Price,
    /// Price before discount, if the product is on offer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Category label, e.g. "Eid Collection".
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Optional ribbon such as "Best Seller".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

impl Product {
    /// Whole-number discount against the original price, if any.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u64> {
        self.original_price
            .and_then(|original| self.price.discount_percent_from(original))
    }
}
