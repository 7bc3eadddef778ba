//! Checkout from a filled cart to the receipt, and the ways it can fail.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use async_trait::async_trait;
use noor_panjabi_integration_tests::TestServer;
use noor_panjabi_storefront::services::{OrderAck, OrderDesk, OrderDeskError, StubOrderDesk};

const SHIPPING: [(&str, &str); 4] = [
    ("name", "Arifur Rahman"),
    ("mobile", "01700000000"),
    ("address", "House 12, Road 4, Dhanmondi"),
    ("district", "Dhaka"),
];

struct ClosedDesk;

#[async_trait]
impl OrderDesk for ClosedDesk {
    async fn submit(&self, _payload: &serde_json::Value) -> Result<OrderAck, OrderDeskError> {
        Err(OrderDeskError::Unavailable("closed for Eid".to_string()))
    }
}

#[tokio::test]
async fn test_worked_example() {
    let server = TestServer::spawn().await;

    server.post_form("/cart/add", &[("product_id", "1")]).await;
    server.post_form("/cart/add", &[("product_id", "1")]).await;
    assert_eq!(server.cart_count().await, 2);

    server
        .post_form("/cart/update", &[("product_id", "1"), ("delta", "-1")])
        .await;
    assert_eq!(server.cart_count().await, 1);

    let (status, form) = server.get("/checkout").await;
    assert_eq!(status, 200);
    assert!(form.contains("৳3,450"));
    assert!(form.contains("৳3,550"));

    let (status, receipt) = server.post_form("/checkout", &SHIPPING).await;
    assert_eq!(status, 200);
    assert!(receipt.contains("Order Confirmed"));
    assert!(receipt.contains("NH-"));
    assert!(receipt.contains("৳3,550"));
    assert!(receipt.contains("Classic Cream Silk Panjabi"));

    assert_eq!(server.cart_count().await, 0);
}

#[tokio::test]
async fn test_empty_cart_cannot_check_out() {
    let server = TestServer::spawn().await;

    let (status, body) = server.post_form("/checkout", &SHIPPING).await;
    assert_eq!(status, 422);
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_missing_field_keeps_input() {
    let server = TestServer::spawn().await;
    server.post_form("/cart/add", &[("product_id", "2")]).await;

    let (status, body) = server
        .post_form(
            "/checkout",
            &[
                ("name", "Arifur Rahman"),
                ("mobile", ""),
                ("address", "Zindabazar"),
                ("district", "Sylhet"),
            ],
        )
        .await;
    assert_eq!(status, 422);
    assert!(body.contains("Mobile number is required"));
    assert!(body.contains("value=\"Arifur Rahman\""));
    assert_eq!(server.cart_count().await, 1);
}

#[tokio::test]
async fn test_unknown_district_is_rejected() {
    let server = TestServer::spawn().await;
    server.post_form("/cart/add", &[("product_id", "2")]).await;

    let (status, body) = server
        .post_form(
            "/checkout",
            &[
                ("name", "Arifur Rahman"),
                ("mobile", "01700000000"),
                ("address", "KDA Avenue"),
                ("district", "Khulna"),
            ],
        )
        .await;
    assert_eq!(status, 422);
    assert!(body.contains("We do not deliver to Khulna"));
}

#[tokio::test]
async fn test_order_desk_failure_keeps_cart() {
    let server = TestServer::spawn_with_order_desk(Box::new(ClosedDesk)).await;
    server.post_form("/cart/add", &[("product_id", "6")]).await;
    server.post_form("/cart/add", &[("product_id", "3")]).await;

    let (status, body) = server.post_form("/checkout", &SHIPPING).await;
    assert_eq!(status, 200);
    assert!(body.contains("We could not place your order"));
    assert!(!body.contains("Order Confirmed"));

    assert_eq!(server.cart_count().await, 2);
}

#[tokio::test]
async fn test_item_added_during_checkout_stays_in_cart() {
    let server =
        TestServer::spawn_with_order_desk(Box::new(StubOrderDesk::new(Duration::from_millis(400))))
            .await;
    server.post_form("/cart/add", &[("product_id", "1")]).await;

    let checkout = tokio::spawn({
        let client = server.client().clone();
        let url = server.url("/checkout");
        async move {
            let response = client.post(url).form(&SHIPPING).send().await.unwrap();
            (response.status().as_u16(), response.text().await.unwrap())
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, _, _) = server
        .post_fragment("/cart/add", &[("product_id", "2")])
        .await;
    assert_eq!(status, 200);

    let (status, receipt) = checkout.await.unwrap();
    assert_eq!(status, 200);
    assert!(receipt.contains("Order Confirmed"));
    assert!(receipt.contains("Classic Cream Silk Panjabi"));
    assert!(!receipt.contains("Deep Emerald Embroidery"));

    assert_eq!(server.cart_count().await, 1);
    let (_, cart) = server.get("/cart").await;
    assert!(cart.contains("Deep Emerald Embroidery"));
}
