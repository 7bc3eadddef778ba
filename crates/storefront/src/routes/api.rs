//! JSON API handlers.

use axum::{Json, extract::State};
use noor_panjabi_core::Product;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::advisor::get_advice;
use crate::error::{AppError, Result};
use crate::services::OrderAck;
use crate::state::AppState;

/// Chat request body.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// List every product in catalog order.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().all().to_vec())
}

/// Hand an order payload to the order desk.
///
/// POST /api/orders
#[instrument(skip(state, payload))]
pub async fn orders(
    State(state): State<AppState>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<OrderAck>> {
    let ack = state.order_desk().submit(&payload).await?;
    Ok(Json(ack))
}

/// Ask the style consultant one question. No transcript is kept.
///
/// POST /api/chat
#[instrument(skip(state, request), fields(message_len = request.message.len()))]
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".to_string()));
    }
    let reply = get_advice(state.advisor(), &request.message).await;
    Ok(Json(ChatResponse { reply }))
}
