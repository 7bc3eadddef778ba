//! Session-related types.
//!
//! The session holds a single value: the id of the visitor's
//! [`Visit`](super::Visit). Everything else is looked up by that id.

use tower_sessions::Session;
use uuid::Uuid;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the visitor id.
    pub const VISIT: &str = "visit";
}

/// The visitor id stored in `session`, assigning a fresh one on first visit.
///
/// # Errors
///
/// Returns error if the session store fails or the stored value is corrupt.
pub async fn visit_id(session: &Session) -> Result<Uuid, tower_sessions::session::Error> {
    if let Some(id) = session.get::<Uuid>(keys::VISIT).await? {
        return Ok(id);
    }
    let id = Uuid::new_v4();
    session.insert(keys::VISIT, id).await?;
    Ok(id)
}
