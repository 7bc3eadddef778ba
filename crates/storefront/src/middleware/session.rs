//! Session middleware configuration.
//!
//! Sessions are held in memory and only carry the visitor id; carts and chat
//! transcripts live in [`VisitStore`](crate::models::VisitStore). Neither
//! survives a restart.

use std::time::Duration;

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "noor_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Inactivity after which a session, and the visit behind it, is forgotten.
#[allow(clippy::cast_sign_loss)]
pub const SESSION_IDLE: Duration = Duration::from_secs(SESSION_EXPIRY_SECONDS as u64);

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
