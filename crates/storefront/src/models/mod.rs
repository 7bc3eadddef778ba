//! Domain models for storefront.
//!
//! - [`session`] - The visitor id kept in the session cookie
//! - [`visit`] - Per-visitor cart and chat transcript
//! - [`view`] - Which screen is shown and the page chrome around it

pub mod session;
pub mod view;
pub mod visit;

pub use session::keys as session_keys;
pub use view::{Chrome, View};
pub use visit::{Visit, VisitHandle, VisitStore};
