//! Catalog browsing and the JSON API.

#![allow(clippy::unwrap_used)]

use noor_panjabi_integration_tests::TestServer;
use serde_json::json;

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::spawn().await;

    assert_eq!(server.get("/health").await, (200, "ok".to_string()));
    assert_eq!(server.get("/health/ready").await.0, 200);
}

#[tokio::test]
async fn test_home_page_lists_featured_products() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/").await;
    assert_eq!(status, 200);
    assert!(body.contains("Classic Cream Silk Panjabi"));
    assert!(body.contains("Arifur Rahman"));
}

#[tokio::test]
async fn test_shop_filters_by_category() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/shop?category=wedding").await;
    assert_eq!(status, 200);
    assert!(body.contains("Deep Emerald Embroidery"));
    assert!(body.contains("Golden Zardosi Wedding Set"));
    assert!(!body.contains("Midnight Black Minimalist"));

    let (_, all) = server.get("/shop?category=unknown").await;
    assert!(all.contains("Midnight Black Minimalist"));
}

#[tokio::test]
async fn test_product_page_and_missing_product() {
    let server = TestServer::spawn().await;

    let (status, body) = server.get("/products/1").await;
    assert_eq!(status, 200);
    assert!(body.contains("Classic Cream Silk Panjabi"));
    assert!(body.contains("৳4,200"));

    assert_eq!(server.get("/products/999").await.0, 404);
}

#[tokio::test]
async fn test_api_products_returns_catalog() {
    let server = TestServer::spawn().await;

    let response = server
        .client()
        .get(server.url("/api/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let products: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0]["id"], 1);
    assert_eq!(products[0]["price"], 3450);
    assert_eq!(products[0]["originalPrice"], 4200);
}

#[tokio::test]
async fn test_api_orders_acknowledges() {
    let server = TestServer::spawn().await;

    let response = server
        .client()
        .post(server.url("/api/orders"))
        .json(&json!({ "items": [{ "id": 1, "quantity": 1 }] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let ack: serde_json::Value = response.json().await.unwrap();
    assert_eq!(ack["success"], true);
    let number = ack["orderId"].as_u64().unwrap();
    assert!((10_000..=99_999).contains(&number));
}

#[tokio::test]
async fn test_information_pages_render() {
    let server = TestServer::spawn().await;

    for path in ["/about", "/returns", "/size-guide", "/quality", "/contact", "/order-status"] {
        let (status, _) = server.get(path).await;
        assert_eq!(status, 200, "{path}");
    }
}

#[tokio::test]
async fn test_track_order_and_contact_forms() {
    let server = TestServer::spawn().await;

    let (_, body) = server
        .post_form("/order-status", &[("order_id", "NH-12345")])
        .await;
    assert!(body.contains("Processing"));

    let (status, body) = server.post_form("/order-status", &[("order_id", " ")]).await;
    assert_eq!(status, 200);
    assert!(body.contains("Please enter your order number."));

    let (status, _) = server
        .post_form(
            "/contact",
            &[("name", "Salman"), ("email", "not-an-email"), ("message", "Hi")],
        )
        .await;
    assert_eq!(status, 422);
}

#[tokio::test]
async fn test_security_headers_present() {
    let server = TestServer::spawn().await;

    let response = server.client().get(server.url("/")).send().await.unwrap();
    let headers = response.headers();
    assert_eq!(
        headers.get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert!(headers.contains_key("content-security-policy"));
    assert!(headers.contains_key("x-request-id"));
}
