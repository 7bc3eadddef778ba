//! Visitor extractor.
//!
//! Resolves the session cookie to the visitor's shared [`VisitHandle`].

use std::ops::Deref;

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::VisitHandle;
use crate::models::session::visit_id;
use crate::state::AppState;

/// The current visitor's cart and chat state.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(visitor: Visitor) -> Result<impl IntoResponse> {
///     let count = visitor.lock().await.cart.total_count();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Visitor(VisitHandle);

impl Deref for Visitor {
    type Target = VisitHandle;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<VisitHandle> for Visitor {
    fn from(handle: VisitHandle) -> Self {
        Self(handle)
    }
}

impl FromRequestParts<AppState> for Visitor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer missing".to_string()))?;

        let id = visit_id(&session).await?;
        Ok(Self(state.visits().open(id).await))
    }
}
