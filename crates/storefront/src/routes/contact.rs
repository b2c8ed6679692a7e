//! Contact form route handlers.
//!
//! The form is validated and logged; there is no outbound mail service, so
//! "sending" is an acknowledgement page.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use serde::Deserialize;
use tracing::instrument;

use bento_bop_core::Email;

use crate::filters;

/// Contact form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactForm,
    pub error: Option<String>,
    pub submitted: bool,
}

/// Display the contact form.
#[instrument]
pub async fn show() -> ContactTemplate {
    ContactTemplate {
        form: ContactForm::default(),
        error: None,
        submitted: false,
    }
}

/// Submit the contact form.
#[instrument(skip(form), fields(email = %form.email))]
pub async fn submit(Form(form): Form<ContactForm>) -> ContactTemplate {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return ContactTemplate {
            form,
            error: Some("Name and message are required.".to_string()),
            submitted: false,
        };
    }

    if Email::parse(&form.email).is_err() {
        return ContactTemplate {
            form,
            error: Some("Please enter a valid email address.".to_string()),
            submitted: false,
        };
    }

    tracing::info!(
        name = form.name.trim(),
        subject = form.subject.trim(),
        "contact message received"
    );

    ContactTemplate {
        form: ContactForm::default(),
        error: None,
        submitted: true,
    }
}
