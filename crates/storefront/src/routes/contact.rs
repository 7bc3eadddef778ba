//! Contact form route handlers.
//!
//! Messages are acknowledged and logged; there is no inbox behind the form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noor_panjabi_core::Email;
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::Visitor;
use crate::models::{Chrome, View};

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub chrome: Chrome,
    pub form: ContactForm,
    pub error: Option<String>,
    pub sent_to: Option<String>,
}

/// Check the form, returning the sender's normalized email.
fn validate(form: &ContactForm) -> std::result::Result<Email, String> {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err("Name and message are required.".to_string());
    }
    if form.phone.trim().is_empty() {
        return Err("Please enter your mobile number.".to_string());
    }
    Email::parse(&form.email).map_err(|_| "Please enter a valid email address.".to_string())
}

/// Display the contact form.
#[instrument(skip(visitor))]
pub async fn show(visitor: Visitor) -> Result<impl IntoResponse> {
    Ok(ContactTemplate {
        chrome: super::chrome(&visitor, View::Contact).await,
        form: ContactForm::default(),
        error: None,
        sent_to: None,
    })
}

/// Submit the contact form.
#[instrument(skip(visitor, form))]
pub async fn submit(visitor: Visitor, Form(form): Form<ContactForm>) -> Result<Response> {
    let chrome = super::chrome(&visitor, View::Contact).await;

    match validate(&form) {
        Ok(email) => {
            tracing::info!(email_domain = %email.domain(), "Contact message received");
            Ok(ContactTemplate {
                chrome,
                form: ContactForm::default(),
                error: None,
                sent_to: Some(form.name.trim().to_string()),
            }
            .into_response())
        }
        Err(error) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            ContactTemplate {
                chrome,
                form,
                error: Some(error),
                sent_to: None,
            },
        )
            .into_response()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Salman Khan".to_string(),
            phone: "01800000000".to_string(),
            email: " Salman@Example.COM ".to_string(),
            message: "Do you tailor for weddings?".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let email = validate(&form()).expect("valid form");
        assert_eq!(email.as_str(), "salman@example.com");
    }

    #[test]
    fn test_required_fields() {
        let mut missing = form();
        missing.message = " ".to_string();
        assert!(validate(&missing).is_err());

        let mut bad_email = form();
        bad_email.email = "salman".to_string();
        assert_eq!(
            validate(&bad_email).unwrap_err(),
            "Please enter a valid email address."
        );
    }
}
