//! Navigation state.

use std::fmt;

/// The screens of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Shop,
    ProductDetails,
    Cart,
    Checkout,
    Chat,
    About,
    Contact,
    OrderStatus,
    Returns,
    SizeGuide,
    Quality,
}

impl View {
    /// Short key used by templates to highlight the nav.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Shop | Self::ProductDetails => "shop",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Chat => "chat",
            Self::About => "about",
            Self::Contact => "contact",
            Self::OrderStatus => "order-status",
            Self::Returns => "returns",
            Self::SizeGuide => "size-guide",
            Self::Quality => "quality",
        }
    }

    /// Default page title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Noor Panjabi House",
            Self::Shop => "Shop",
            Self::ProductDetails => "Product",
            Self::Cart => "Your Cart",
            Self::Checkout => "Checkout",
            Self::Chat => "Style Consultant",
            Self::About => "About Us",
            Self::Contact => "Contact",
            Self::OrderStatus => "Order Status",
            Self::Returns => "Returns & Exchanges",
            Self::SizeGuide => "Size Guide",
            Self::Quality => "Quality Assurance",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Data every page's layout needs: title, active nav entry, cart badge.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub title: String,
    pub view: View,
    pub cart_count: u32,
}

impl Chrome {
    #[must_use]
    pub fn new(view: View, cart_count: u32) -> Self {
        Self {
            title: view.title().to_string(),
            view,
            cart_count,
        }
    }

    /// Use a page-specific title, e.g. the product name.
    #[must_use]
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Whether the nav entry `key` is the current one.
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.view.key() == key
    }
}
