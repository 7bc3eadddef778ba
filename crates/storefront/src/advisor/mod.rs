//! Style consultant advisors.
//!
//! An advisor turns a visitor's free-text question into a short styling
//! suggestion. Advisors may fail; [`get_advice`] never does, replying with
//! [`FALLBACK_ADVICE`] instead.

mod gemini;
mod scripted;

use async_trait::async_trait;
use thiserror::Error;
use tracing::instrument;

pub use gemini::GeminiAdvisor;
pub use scripted::ScriptedAdvisor;

use crate::config::AdvisorConfig;

/// Reply used whenever the advisor cannot answer.
pub const FALLBACK_ADVICE: &str = "I'm currently adjusting my sewing machine. \
Please try again in a moment for expert style advice!";

/// Stylist persona given to generative advisors.
pub const STYLIST_PERSONA: &str = "You are a professional fashion stylist for \
\"Noor Panjabi House\", a premium Bangladeshi panjabi brand. Help customers choose the \
perfect panjabi for their occasion (Eid, Wedding, Jummah, Casual). Keep your tone elegant, \
respectful and helpful. Recommend colors like Emerald Green, Cream, Black and Navy Blue. \
Talk about fabrics like Silk, Cotton and Jamdani motifs. Mention that Noor Panjabi House \
offers premium BDT pricing. Keep responses concise (under 3 sentences).";

/// Errors that can occur when asking an advisor.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The reply had no text.
    #[error("advisor returned an empty reply")]
    EmptyReply,

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Produces styling advice for a visitor's message.
#[async_trait]
pub trait StyleAdvisor: Send + Sync {
    /// Answer `prompt`. Each call is independent of earlier ones.
    async fn advise(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Ask `advisor`, substituting [`FALLBACK_ADVICE`] for failures and blank replies.
#[instrument(skip(advisor, prompt), fields(prompt_len = prompt.len()))]
pub async fn get_advice(advisor: &dyn StyleAdvisor, prompt: &str) -> String {
    match advisor.advise(prompt).await {
        Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
        Ok(_) => {
            tracing::warn!("Advisor returned a blank reply");
            FALLBACK_ADVICE.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Advisor request failed");
            FALLBACK_ADVICE.to_string()
        }
    }
}

/// Pick the advisor described by `config`: Gemini when a key is set,
/// otherwise the offline scripted consultant.
///
/// # Errors
///
/// Returns error if the Gemini HTTP client cannot be built.
pub fn advisor_from_config(
    config: Option<&AdvisorConfig>,
) -> Result<Box<dyn StyleAdvisor>, AdvisorError> {
    Ok(match config {
        Some(config) => Box::new(GeminiAdvisor::new(config)?),
        None => Box::new(ScriptedAdvisor),
    })
}
