//! Checkout: shipping details, order snapshots, and the form-to-receipt state machine.
//!
//! ```text
//!            submit ok
//!   Form ───────────────► Confirmed(receipt)   ordered units leave the cart
//!     ▲  │
//!     │  │ submit rejected by the order desk
//!     │  ▼
//!   Failed(reason) ─────► Form (resubmit)      cart untouched
//! ```
//!
//! Building an [`Order`] only snapshots the cart. [`settle`] takes the
//! ordered units out of the cart, and only when the order desk accepted the
//! order. Anything added while the order desk was deciding stays behind.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::types::{OrderNumber, Price};

/// Flat delivery charge added to every order.
pub const SHIPPING_FEE: Price = Price::new(100);

/// Cart total plus the flat shipping fee.
#[must_use]
pub fn grand_total(subtotal: Price) -> Price {
    subtotal + SHIPPING_FEE
}

/// Errors raised while building an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    /// A required shipping field was blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The district is not one we deliver to.
    #[error("we do not deliver to {0}")]
    UnknownDistrict(String),

    /// There is nothing to order.
    #[error("your cart is empty")]
    EmptyCart,
}

/// Districts the shop delivers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    Dhaka,
    Chittagong,
    Sylhet,
    Rajshahi,
}

impl District {
    /// Every district, in form order.
    pub const ALL: [Self; 4] = [Self::Dhaka, Self::Chittagong, Self::Sylhet, Self::Rajshahi];

    /// Form value and display name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dhaka => "Dhaka",
            Self::Chittagong => "Chittagong",
            Self::Sylhet => "Sylhet",
            Self::Rajshahi => "Rajshahi",
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for District {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CheckoutError::MissingField("district"));
        }
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CheckoutError::UnknownDistrict(s.to_string()))
    }
}

/// How the customer pays. Only cash on delivery is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CashOnDelivery => f.write_str("Cash on delivery"),
        }
    }
}

/// Where and to whom the order is delivered.
///
/// Fields are only checked for presence; phone numbers and addresses are
/// confirmed by a call from the shop, not by format rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub recipient_name: String,
    pub mobile: String,
    pub address: String,
    pub district: District,
    pub payment: PaymentMethod,
}

impl ShippingDetails {
    /// Build shipping details from raw form fields.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] for the first blank field and
    /// [`CheckoutError::UnknownDistrict`] for an unsupported district.
    pub fn new(
        recipient_name: &str,
        mobile: &str,
        address: &str,
        district: &str,
    ) -> Result<Self, CheckoutError> {
        Ok(Self {
            recipient_name: required("name", recipient_name)?,
            mobile: required("mobile number", mobile)?,
            address: required("address", address)?,
            district: district.parse()?,
            payment: PaymentMethod::CashOnDelivery,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CheckoutError::MissingField(field));
    }
    Ok(value.to_string())
}

/// A snapshot of the cart at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identity of the order.
    pub id: Uuid,
    /// Display number printed on the receipt.
    pub number: OrderNumber,
    pub lines: Vec<CartLine>,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub grand_total: Price,
    pub shipping: ShippingDetails,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshot `cart` into a new order with a random display number.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn from_cart(cart: &Cart, shipping: ShippingDetails) -> Result<Self, CheckoutError> {
        Self::with_number(cart, shipping, OrderNumber::random())
    }

    /// Snapshot `cart` into a new order with the given display number.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn with_number(
        cart: &Cart,
        shipping: ShippingDetails,
        number: OrderNumber,
    ) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let subtotal = cart.total_value();
        Ok(Self {
            id: Uuid::new_v4(),
            number,
            lines: cart.lines().to_vec(),
            subtotal,
            shipping_fee: SHIPPING_FEE,
            grand_total: grand_total(subtotal),
            shipping,
            placed_at: Utc::now(),
        })
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity()))
    }
}

/// Where a checkout currently stands.
///
/// `Form` is the starting state; [`settle`] moves a submission to one of the
/// other two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Collecting shipping details.
    Form,
    /// The order was accepted; its units have left the cart.
    Confirmed(Box<Order>),
    /// The order desk rejected the order; the cart is unchanged.
    Failed {
        /// Human-readable reason shown above the form.
        reason: String,
    },
}

impl CheckoutState {
    /// Whether this is a terminal success.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

/// Apply the order desk's answer for `order`.
///
/// On success the ordered units are removed from `cart` (the live cart, which
/// may have changed since the snapshot) and the receipt is returned; on
/// failure the cart is left exactly as it is.
pub fn settle<E: fmt::Display>(
    cart: &mut Cart,
    order: Order,
    outcome: Result<(), E>,
) -> CheckoutState {
    match outcome {
        Ok(()) => {
            cart.remove_ordered(&order.lines);
            CheckoutState::Confirmed(Box::new(order))
        }
        Err(e) => CheckoutState::Failed {
            reason: e.to_string(),
        },
    }
}
