//! External services the storefront talks to.
//!
//! # Services
//!
//! - `order_desk` - Accepts placed orders and acknowledges them

pub mod order_desk;

pub use order_desk::{OrderAck, OrderDesk, OrderDeskError, StubOrderDesk, place_order};
