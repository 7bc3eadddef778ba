//! Style consultant chat handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use noor_panjabi_core::chat::{ChatMessage, Settlement, Transcript};
use serde::Deserialize;
use tracing::instrument;

use crate::advisor::get_advice;
use crate::error::Result;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};
use crate::state::AppState;

/// Chat message form data.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    pub message: String,
}

/// Chat page template.
#[derive(Template, WebTemplate)]
#[template(path = "chat/show.html")]
pub struct ChatShowTemplate {
    pub chrome: Chrome,
    pub messages: Vec<ChatMessage>,
    pub waiting: bool,
}

/// Chat transcript fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/chat_messages.html")]
pub struct ChatMessagesTemplate {
    pub messages: Vec<ChatMessage>,
    pub waiting: bool,
}

/// Display the transcript.
///
/// While a reply is outstanding the transcript ends with a typing indicator.
#[instrument(skip(visitor))]
pub async fn show(visitor: Visitor) -> Result<impl IntoResponse> {
    let visit = visitor.lock().await;

    Ok(ChatShowTemplate {
        chrome: Chrome::new(View::Chat, visit.cart.total_count()),
        messages: visit.transcript.messages().to_vec(),
        waiting: visit.transcript.is_waiting(),
    })
}

/// Send a message and wait for the consultant's reply.
#[instrument(skip(state, visitor, headers, form), fields(message_len = form.message.len()))]
pub async fn send(
    State(state): State<AppState>,
    visitor: Visitor,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Result<Response> {
    let transcript = converse(&state, &visitor, &form.message).await;

    if super::is_htmx(&headers) {
        return Ok(ChatMessagesTemplate {
            messages: transcript.messages().to_vec(),
            waiting: transcript.is_waiting(),
        }
        .into_response());
    }
    Ok(Redirect::to("/chat").into_response())
}

/// Record `message`, ask the advisor, and apply the reply if it is still
/// the newest one. Blank messages change nothing.
///
/// The visit is unlocked while the advisor thinks, so the pending message
/// and typing indicator are visible to other requests, and a newer message
/// can supersede this one.
pub(crate) async fn converse(state: &AppState, visitor: &Visitor, message: &str) -> Transcript {
    let ticket = {
        let mut visit = visitor.lock().await;
        match visit.transcript.submit(message) {
            Some(ticket) => ticket,
            None => return visit.transcript.clone(),
        }
    };

    let reply = get_advice(state.advisor(), message).await;

    let mut visit = visitor.lock().await;
    if visit.transcript.settle(ticket, reply) == Settlement::Stale {
        tracing::debug!("Discarded reply to a superseded message");
    }
    visit.transcript.clone()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use noor_panjabi_core::catalog::Catalog;
    use noor_panjabi_core::chat::ChatRole;

    use super::*;
    use crate::advisor::{AdvisorError, StyleAdvisor};
    use crate::config::StorefrontConfig;
    use crate::models::VisitHandle;
    use crate::services::StubOrderDesk;

    /// Answers slowly for messages starting with "first", quickly otherwise.
    struct SlowFirst;

    #[async_trait]
    impl StyleAdvisor for SlowFirst {
        async fn advise(&self, prompt: &str) -> std::result::Result<String, AdvisorError> {
            let wait = if prompt.starts_with("first") { 300 } else { 20 };
            tokio::time::sleep(Duration::from_millis(wait)).await;
            Ok(format!("reply to {prompt}"))
        }
    }

    fn state() -> AppState {
        AppState::from_parts(
            StorefrontConfig::offline(),
            Catalog::fallback(),
            Box::new(SlowFirst),
            Box::new(StubOrderDesk::default()),
        )
    }

    fn texts(transcript: &Transcript) -> Vec<String> {
        transcript
            .messages()
            .iter()
            .filter(|m| m.role == ChatRole::User || m.text.starts_with("reply"))
            .map(|m| m.text.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_pending_message_visible_while_waiting() {
        let state = state();
        let visitor = Visitor::from(VisitHandle::default());

        let send = tokio::spawn({
            let state = state.clone();
            let visitor = visitor.clone();
            async move { converse(&state, &visitor, "first question").await }
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let visit = visitor.lock().await;
            assert!(visit.transcript.is_waiting());
            assert_eq!(texts(&visit.transcript), ["first question"]);
        }

        send.await.expect("task");
        assert!(!visitor.lock().await.transcript.is_waiting());
    }

    #[tokio::test]
    async fn test_overlapping_messages_keep_only_newest_reply() {
        let state = state();
        let visitor = Visitor::from(VisitHandle::default());

        let first = tokio::spawn({
            let state = state.clone();
            let visitor = visitor.clone();
            async move { converse(&state, &visitor, "first question").await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        converse(&state, &visitor, "second question").await;
        first.await.expect("task");

        let visit = visitor.lock().await;
        assert_eq!(
            texts(&visit.transcript),
            ["first question", "second question", "reply to second question"]
        );
        assert!(!visit.transcript.is_waiting());
    }

    #[tokio::test]
    async fn test_blank_message_changes_nothing() {
        let state = state();
        let visitor = Visitor::from(VisitHandle::default());

        let transcript = converse(&state, &visitor, "  ").await;
        assert_eq!(transcript.messages().len(), 1);
        assert!(!transcript.is_waiting());
    }
}
