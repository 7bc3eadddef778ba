//! Static content page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};

/// One row of the size chart, in inches.
pub struct SizeRow {
    pub size: &'static str,
    pub chest: &'static str,
    pub length: &'static str,
    pub sleeve: &'static str,
    pub shoulder: &'static str,
}

/// Panjabi measurements by size.
pub const SIZE_CHART: &[SizeRow] = &[
    SizeRow {
        size: "S",
        chest: "38",
        length: "40",
        sleeve: "24",
        shoulder: "16.5",
    },
    SizeRow {
        size: "M",
        chest: "40",
        length: "42",
        sleeve: "25",
        shoulder: "17.5",
    },
    SizeRow {
        size: "L",
        chest: "42",
        length: "44",
        sleeve: "25.5",
        shoulder: "18.5",
    },
    SizeRow {
        size: "XL",
        chest: "44",
        length: "46",
        sleeve: "26",
        shoulder: "19.5",
    },
    SizeRow {
        size: "XXL",
        chest: "46",
        length: "48",
        sleeve: "26.5",
        shoulder: "20.5",
    },
];

/// Status reported for every tracked order.
pub const TRACKED_ORDER_STATUS: &str = "Processing";

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub chrome: Chrome,
}

/// Returns & exchanges page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/returns.html")]
pub struct ReturnsTemplate {
    pub chrome: Chrome,
}

/// Size guide page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/size_guide.html")]
pub struct SizeGuideTemplate {
    pub chrome: Chrome,
    pub rows: &'static [SizeRow],
}

/// Quality assurance page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/quality.html")]
pub struct QualityTemplate {
    pub chrome: Chrome,
}

/// Order tracking page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/order_status.html")]
pub struct OrderStatusTemplate {
    pub chrome: Chrome,
    pub order_id: String,
    pub status: Option<&'static str>,
    pub error: Option<String>,
}

/// Order tracking form data.
#[derive(Debug, Deserialize)]
pub struct TrackOrderForm {
    #[serde(default)]
    pub order_id: String,
}

/// Display the About page.
#[instrument(skip(visitor))]
pub async fn about(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(AboutTemplate {
        chrome: super::chrome(&visitor, View::About).await,
    })
}

/// Display the Returns & Exchanges page.
#[instrument(skip(visitor))]
pub async fn returns(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(ReturnsTemplate {
        chrome: super::chrome(&visitor, View::Returns).await,
    })
}

/// Display the Size Guide page.
#[instrument(skip(visitor))]
pub async fn size_guide(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(SizeGuideTemplate {
        chrome: super::chrome(&visitor, View::SizeGuide).await,
        rows: SIZE_CHART,
    })
}

/// Display the Quality Assurance page.
#[instrument(skip(visitor))]
pub async fn quality(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(QualityTemplate {
        chrome: super::chrome(&visitor, View::Quality).await,
    })
}

/// Display the order tracking form.
#[instrument(skip(visitor))]
pub async fn order_status(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(OrderStatusTemplate {
        chrome: super::chrome(&visitor, View::OrderStatus).await,
        order_id: String::new(),
        status: None,
        error: None,
    })
}

/// Look up an order. Orders are not stored, so any id reports processing.
#[instrument(skip(visitor))]
pub async fn track_order(
    visitor: Visitor,
    Form(form): Form<TrackOrderForm>,
) -> Result<impl IntoResponse> {
    let order_id = form.order_id.trim().to_string();
    let (status, error) = if order_id.is_empty() {
        (None, Some("Please enter your order number.".to_string()))
    } else {
        (Some(TRACKED_ORDER_STATUS), None)
    };

    Ok(OrderStatusTemplate {
        chrome: super::chrome(&visitor, View::OrderStatus).await,
        order_id,
        status,
        error,
    })
}
