//! Noor Panjabi House Core - Shared domain library.
//!
//! This crate holds the storefront's domain model and the logic that has to
//! stay correct no matter how it is rendered:
//! - `storefront` - Public web front-end (depends on this crate)
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP, no
//! session storage. Everything here can be unit tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, emails, and the `Product` record
//! - [`cart`] - The cart engine (line items, quantities, derived totals)
//! - [`checkout`] - Shipping details, order snapshots, and the checkout state machine
//! - [`chat`] - Style-consultant chat transcript with reply sequencing
//! - [`catalog`] - The bundled fallback catalog and category list

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod checkout;
pub mod types;

pub use cart::{Cart, CartLine};
pub use checkout::{CheckoutError, CheckoutState, Order, SHIPPING_FEE, ShippingDetails};
pub use types::*;
