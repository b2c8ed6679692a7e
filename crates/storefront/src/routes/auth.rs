//! Authentication route handlers.
//!
//! Sign-in is simulated: any well-formed email plus a password of at least
//! six characters is accepted, and nothing is ever stored or verified.
//! What remains real is the form validation and the session handling.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bento_bop_core::{Email, UserId};

use crate::error::{self, Result};
use crate::filters;
use crate::models::CurrentUser;
use crate::models::session as session_state;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Helpers
// =============================================================================

/// Materialize a session user for a validated email.
///
/// The id is random and the display name defaults to the email's local part,
/// the way the original demo auth behaved.
fn make_user(name: Option<&str>, email: Email) -> CurrentUser {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(
            || {
                email
                    .as_str()
                    .split('@')
                    .next()
                    .unwrap_or_default()
                    .to_string()
            },
            String::from,
        );

    CurrentUser {
        id: UserId::new(i32::from(rand::rng().random::<u16>())),
        name,
        email,
    }
}

/// Sign the user in and land them on their account page.
async fn sign_in(session: &Session, user: CurrentUser) -> Result<Response> {
    session_state::set_current_user(session, &user).await?;
    error::set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user = %user.email, "signed in");
    Ok(Redirect::to("/account").into_response())
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the login page.
#[instrument]
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Handle login form submission.
#[instrument(skip(session, form))]
pub async fn login(session: Session, Form(form): Form<LoginForm>) -> Result<Response> {
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => {
            return Ok(LoginTemplate {
                error: Some("Invalid email format".to_string()),
                email: form.email,
            }
            .into_response());
        }
    };

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Ok(LoginTemplate {
            error: Some(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )),
            email: form.email,
        }
        .into_response());
    }

    sign_in(&session, make_user(None, email)).await
}

/// Display the register page.
#[instrument]
pub async fn register_page() -> RegisterTemplate {
    RegisterTemplate {
        error: None,
        name: String::new(),
        email: String::new(),
    }
}

/// Handle registration form submission.
#[instrument(skip(session, form))]
pub async fn register(session: Session, Form(form): Form<RegisterForm>) -> Result<Response> {
    let rerender = |error: String, form: &RegisterForm| {
        RegisterTemplate {
            error: Some(error),
            name: form.name.clone(),
            email: form.email.clone(),
        }
        .into_response()
    };

    if form.name.trim().is_empty() {
        return Ok(rerender("Name is required".to_string(), &form));
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => return Ok(rerender("Invalid email format".to_string(), &form)),
    };

    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Ok(rerender(
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            &form,
        ));
    }

    if form.password != form.confirm_password {
        return Ok(rerender("Passwords do not match".to_string(), &form));
    }

    sign_in(&session, make_user(Some(&form.name), email)).await
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    session_state::clear_current_user(&session).await?;
    error::clear_sentry_user();
    Ok(Redirect::to("/").into_response())
}
