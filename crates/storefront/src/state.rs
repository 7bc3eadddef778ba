//! Application state shared across handlers.

use std::sync::Arc;

use noor_panjabi_core::catalog::Catalog;

use crate::advisor::{AdvisorError, StyleAdvisor, advisor_from_config};
use crate::catalog::{CatalogError, load_catalog, provider_from_config};
use crate::config::StorefrontConfig;
use crate::middleware::session::SESSION_IDLE;
use crate::models::VisitStore;
use crate::services::{OrderDesk, StubOrderDesk};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog provider: {0}")]
    Catalog(#[from] CatalogError),
    #[error("style advisor: {0}")]
    Advisor(#[from] AdvisorError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Everything in it is read-only
/// except the visit store, which guards each visitor's cart and chat with its
/// own lock.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    advisor: Box<dyn StyleAdvisor>,
    order_desk: Box<dyn OrderDesk>,
    visits: VisitStore,
}

impl AppState {
    /// Build the state described by `config`, fetching the catalog once.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client for a configured collaborator
    /// cannot be built. A failing catalog fetch is not an error.
    pub async fn load(config: StorefrontConfig) -> Result<Self, StateError> {
        let provider = provider_from_config(&config.catalog)?;
        let catalog = load_catalog(provider.as_ref()).await;
        let advisor = advisor_from_config(config.advisor.as_ref())?;
        let order_desk = Box::new(StubOrderDesk::new(config.order_desk.delay));

        Ok(Self::from_parts(config, catalog, advisor, order_desk))
    }

    /// Assemble state from already-built collaborators.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        advisor: Box<dyn StyleAdvisor>,
        order_desk: Box<dyn OrderDesk>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                advisor,
                order_desk,
                visits: VisitStore::new(SESSION_IDLE),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The catalog loaded at startup.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The style consultant.
    #[must_use]
    pub fn advisor(&self) -> &dyn StyleAdvisor {
        self.inner.advisor.as_ref()
    }

    /// Where placed orders are sent.
    #[must_use]
    pub fn order_desk(&self) -> &dyn OrderDesk {
        self.inner.order_desk.as_ref()
    }

    /// Live carts and chat transcripts, by visitor.
    #[must_use]
    pub fn visits(&self) -> &VisitStore {
        &self.inner.visits
    }
}
