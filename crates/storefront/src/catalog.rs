//! Catalog providers.
//!
//! The storefront fetches its product list once at startup from a
//! [`CatalogProvider`]. A failing provider never leaves the shop empty:
//! [`load_catalog`] falls back to the bundled collection.

use std::time::Duration;

use async_trait::async_trait;
use noor_panjabi_core::Product;
use noor_panjabi_core::catalog::{Catalog, CatalogSource, bundled_products};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::CatalogConfig;

/// Errors that can occur while fetching the product list.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("catalog feed returned status {0}")]
    Status(u16),

    /// The feed body was not a product list.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of the product list.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch every product on sale, in display order.
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Serves the bundled collection after a simulated network delay.
#[derive(Debug, Clone, Default)]
pub struct BundledCatalog {
    delay: Duration,
}

impl BundledCatalog {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CatalogProvider for BundledCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(bundled_products())
    }
}

/// Fetches a JSON array of products from a remote feed.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalog {
    /// Create a client for the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(url: Url) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<Vec<Product>>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }
}

/// Pick the provider described by `config`.
///
/// # Errors
///
/// Returns error if the remote feed client cannot be built.
pub fn provider_from_config(
    config: &CatalogConfig,
) -> Result<Box<dyn CatalogProvider>, CatalogError> {
    Ok(match &config.url {
        Some(url) => Box::new(HttpCatalog::new(url.clone())?),
        None => Box::new(BundledCatalog::new(config.delay)),
    })
}

/// Fetch the catalog once, validating records and falling back to the
/// bundled collection on failure.
#[instrument(skip(provider))]
pub async fn load_catalog(provider: &dyn CatalogProvider) -> Catalog {
    let fetched = match provider.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(error = %e, "Catalog fetch failed, serving bundled collection");
            return Catalog::fallback();
        }
    };

    let (catalog, rejected) = Catalog::from_fetched(fetched);
    for reason in &rejected {
        tracing::warn!(%reason, "Dropped invalid catalog record");
    }
    if catalog.source() == CatalogSource::Fallback {
        tracing::warn!("Catalog feed had no usable products, serving bundled collection");
    }

    tracing::info!(
        products = catalog.len(),
        source = ?catalog.source(),
        "Catalog loaded"
    );
    catalog
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use noor_panjabi_core::{Price, ProductId};

    use super::*;

    struct FailingCatalog;

    #[async_trait]
    impl CatalogProvider for FailingCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Err(CatalogError::Status(503))
        }
    }

    struct FixedCatalog(Vec<Product>);

    #[async_trait]
    impl CatalogProvider for FixedCatalog {
        async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_bundled_catalog_resolves_bundled_list() {
        let products = BundledCatalog::default().fetch_products().await.unwrap();
        assert_eq!(products, bundled_products());
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back() {
        let catalog = load_catalog(&FailingCatalog).await;
        assert_eq!(catalog.source(), CatalogSource::Fallback);
        assert_eq!(catalog.all(), bundled_products().as_slice());
    }

    #[tokio::test]
    async fn test_empty_fetch_falls_back() {
        let catalog = load_catalog(&FixedCatalog(Vec::new())).await;
        assert_eq!(catalog.source(), CatalogSource::Fallback);
        assert!(!catalog.is_empty());
    }

    #[tokio::test]
    async fn test_provider_records_are_used() {
        let mut only = bundled_products().remove(3);
        only.id = ProductId::new(77);
        only.price = Price::new(3999);

        let catalog = load_catalog(&FixedCatalog(vec![only.clone()])).await;
        assert_eq!(catalog.source(), CatalogSource::Provider);
        assert_eq!(catalog.all(), &[only]);
    }

    #[tokio::test]
    async fn test_unreachable_feed_falls_back() {
        let provider = HttpCatalog::new(Url::parse("http://127.0.0.1:9/products").unwrap()).unwrap();
        let catalog = load_catalog(&provider).await;
        assert_eq!(catalog.source(), CatalogSource::Fallback);
    }

    #[test]
    fn test_provider_from_config_defaults_to_bundled() {
        let config = CatalogConfig {
            url: None,
            delay: Duration::ZERO,
        };
        assert!(provider_from_config(&config).is_ok());
    }

    #[test]
    fn test_catalog_error_display() {
        assert_eq!(
            CatalogError::Status(503).to_string(),
            "catalog feed returned status 503"
        );
    }
}
