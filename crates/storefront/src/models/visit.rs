//! Per-visitor shop state.
//!
//! The session cookie only identifies the visitor. Their cart and chat
//! transcript live here, behind one async mutex per visitor, so that
//! overlapping requests from the same visitor (two tabs, a chat message sent
//! before the previous reply arrived) see each other's changes instead of
//! each writing back a private copy.
//!
//! Handlers never hold the lock across a call to the order desk or the style
//! advisor: they take what they need, release, await, then lock again to
//! apply the result to whatever the state has become.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use noor_panjabi_core::Cart;
use noor_panjabi_core::chat::Transcript;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Everything the shop remembers about one visitor.
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub cart: Cart,
    pub transcript: Transcript,
}

/// Shared handle to one visitor's state.
#[derive(Debug, Clone, Default)]
pub struct VisitHandle(Arc<Mutex<Visit>>);

impl VisitHandle {
    /// Wait for exclusive access to the visit.
    pub async fn lock(&self) -> MutexGuard<'_, Visit> {
        self.0.lock().await
    }

    /// Copy of the current cart.
    pub async fn cart(&self) -> Cart {
        self.lock().await.cart.clone()
    }
}

/// All live visits, forgotten after a period of inactivity.
#[derive(Clone)]
pub struct VisitStore {
    visits: Cache<Uuid, VisitHandle>,
}

impl VisitStore {
    /// Create a store that drops visits idle for longer than `idle`.
    #[must_use]
    pub fn new(idle: Duration) -> Self {
        Self {
            visits: Cache::builder().time_to_idle(idle).build(),
        }
    }

    /// The visit for `id`, starting an empty one on first sight.
    ///
    /// Concurrent first lookups of the same id get the same handle.
    pub async fn open(&self, id: Uuid) -> VisitHandle {
        self.visits.get_with(id, async { VisitHandle::default() }).await
    }
}

impl std::fmt::Debug for VisitStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitStore")
            .field("visits", &self.visits.entry_count())
            .finish()
    }
}
