//! End-to-end tests for the Noor Panjabi House storefront.
//!
//! Each test spawns the full router in-process on an ephemeral port with
//! the offline configuration: bundled catalog, scripted style advisor and
//! no artificial delays unless a test swaps in slower collaborators. Requests go through a cookie-keeping client so the
//! session (cart, chat) survives between calls like it does in a browser.
//!
//! ```bash
//! cargo test -p noor-panjabi-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;

use noor_panjabi_core::catalog::Catalog;
use noor_panjabi_storefront::advisor::{ScriptedAdvisor, StyleAdvisor};
use noor_panjabi_storefront::config::StorefrontConfig;
use noor_panjabi_storefront::services::{OrderDesk, StubOrderDesk};
use noor_panjabi_storefront::{AppState, app};
use tokio::net::TcpListener;

/// A storefront running on a local port plus a browser-like client.
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestServer {
    /// Spawn a storefront with the default collaborators.
    pub async fn spawn() -> Self {
        Self::spawn_with_order_desk(Box::new(StubOrderDesk::default())).await
    }

    /// Spawn a storefront that submits orders to `order_desk`.
    pub async fn spawn_with_order_desk(order_desk: Box<dyn OrderDesk>) -> Self {
        Self::spawn_with(Box::new(ScriptedAdvisor), order_desk).await
    }

    /// Spawn a storefront with the given advisor and order desk.
    pub async fn spawn_with(
        advisor: Box<dyn StyleAdvisor>,
        order_desk: Box<dyn OrderDesk>,
    ) -> Self {
        let state = AppState::from_parts(
            StorefrontConfig::offline(),
            Catalog::fallback(),
            advisor,
            order_desk,
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");

        let service = app(state).into_make_service_with_connect_info::<SocketAddr>();
        tokio::spawn(async move {
            axum::serve(listener, service)
                .await
                .expect("test server failed");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("build client");

        Self { addr, client }
    }

    /// Absolute URL for `path` on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The session-keeping client.
    #[must_use]
    pub const fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET `path` and return the status and body.
    pub async fn get(&self, path: &str) -> (u16, String) {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request");
        let status = response.status().as_u16();
        (status, response.text().await.expect("response body"))
    }

    /// POST a form to `path` and return the status and body.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> (u16, String) {
        let response = self
            .client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request");
        let status = response.status().as_u16();
        (status, response.text().await.expect("response body"))
    }

    /// POST a form to `path` as an HTMX request and return the status,
    /// `HX-Trigger` header and fragment body.
    pub async fn post_fragment(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> (u16, Option<String>, String) {
        let response = self
            .client
            .post(self.url(path))
            .header("HX-Request", "true")
            .form(form)
            .send()
            .await
            .expect("HTMX request");
        let status = response.status().as_u16();
        let trigger = response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        (status, trigger, response.text().await.expect("response body"))
    }

    /// Current cart badge count, read from the count fragment.
    pub async fn cart_count(&self) -> u32 {
        let (_, body) = self.get("/cart/count").await;
        extract_count(&body)
    }
}

/// Parse the number out of the `cart_count` fragment.
#[must_use]
pub fn extract_count(fragment: &str) -> u32 {
    fragment
        .split('>')
        .nth(1)
        .and_then(|rest| rest.split('<').next())
        .and_then(|n| n.trim().parse().ok())
        .expect("cart count fragment")
}
