//! Order desk: the service that accepts placed orders.
//!
//! Only a stub exists. It waits a moment, as a real order system would, and
//! acknowledges every payload.

use std::time::Duration;

use async_trait::async_trait;
use noor_panjabi_core::{Order, OrderNumber};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur when submitting an order.
#[derive(Debug, Error)]
pub enum OrderDeskError {
    /// The desk refused the order.
    #[error("order was not accepted: {0}")]
    Rejected(String),

    /// The desk could not be reached.
    #[error("order desk unavailable: {0}")]
    Unavailable(String),

    /// The order could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Acknowledgment returned for an accepted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    pub success: bool,
    pub order_id: OrderNumber,
}

/// Accepts order payloads.
#[async_trait]
pub trait OrderDesk: Send + Sync {
    /// Submit an order payload.
    async fn submit(&self, payload: &serde_json::Value) -> Result<OrderAck, OrderDeskError>;
}

/// Submit a checkout snapshot to `desk`.
///
/// # Errors
///
/// Returns error if the order cannot be encoded or the desk rejects it.
#[instrument(skip(desk, order), fields(order_id = %order.id, number = %order.number))]
pub async fn place_order(desk: &dyn OrderDesk, order: &Order) -> Result<OrderAck, OrderDeskError> {
    let payload = serde_json::to_value(order)?;
    let ack = desk.submit(&payload).await?;
    if !ack.success {
        return Err(OrderDeskError::Rejected(format!(
            "order desk declined {}",
            order.number
        )));
    }
    Ok(ack)
}

/// Acknowledges everything after a fixed delay.
///
/// The acknowledged id echoes the payload's `number` when it has one, and is
/// drawn at random otherwise.
#[derive(Debug, Clone, Default)]
pub struct StubOrderDesk {
    delay: Duration,
}

impl StubOrderDesk {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl OrderDesk for StubOrderDesk {
    async fn submit(&self, payload: &serde_json::Value) -> Result<OrderAck, OrderDeskError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let order_id = payload
            .get("number")
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .map_or_else(OrderNumber::random, OrderNumber::new);

        tracing::info!(%order_id, "Order acknowledged");
        Ok(OrderAck {
            success: true,
            order_id,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use noor_panjabi_core::{Cart, Price, Product, ProductId, ShippingDetails};

    use super::*;

    fn order() -> Order {
        let mut cart = Cart::new();
        cart.add(&Product {
            id: ProductId::new(1),
            name: "Classic Cream Silk Panjabi".to_string(),
            price: Price::new(3450),
            original_price: None,
            category: "Eid Collection".to_string(),
            image: String::new(),
            badge: None,
        });
        let shipping = ShippingDetails::new("Salman Khan", "01800000000", "Mirpur 10", "Dhaka").unwrap();
        Order::with_number(&cart, shipping, OrderNumber::new(54_321)).unwrap()
    }

    struct Declining;

    #[async_trait]
    impl OrderDesk for Declining {
        async fn submit(&self, _payload: &serde_json::Value) -> Result<OrderAck, OrderDeskError> {
            Ok(OrderAck {
                success: false,
                order_id: OrderNumber::new(10_000),
            })
        }
    }

    #[tokio::test]
    async fn test_stub_echoes_order_number() {
        let ack = place_order(&StubOrderDesk::default(), &order()).await.unwrap();
        assert!(ack.success);
        assert_eq!(ack.order_id, OrderNumber::new(54_321));
    }

    #[tokio::test]
    async fn test_stub_accepts_arbitrary_payload() {
        let ack = StubOrderDesk::default()
            .submit(&serde_json::json!({"items": [], "note": "call first"}))
            .await
            .unwrap();
        assert!(ack.success);
        assert!((OrderNumber::MIN..=OrderNumber::MAX).contains(&ack.order_id.get()));
    }

    #[tokio::test]
    async fn test_declined_ack_is_an_error() {
        let err = place_order(&Declining, &order()).await.unwrap_err();
        assert!(matches!(err, OrderDeskError::Rejected(_)));
    }

    #[test]
    fn test_ack_json_shape() {
        let ack = OrderAck {
            success: true,
            order_id: OrderNumber::new(48_213),
        };
        assert_eq!(
            serde_json::to_value(ack).unwrap(),
            serde_json::json!({"success": true, "orderId": 48213})
        );
    }
}
