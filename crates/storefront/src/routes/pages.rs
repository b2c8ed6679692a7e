//! Static content page route handlers.
//!
//! Serves markdown-based content pages: about, FAQ, privacy policy.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, extract::State, routing::get};
use chrono::NaiveDate;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub title: String,
    pub description: String,
    pub updated_at: Option<NaiveDate>,
    pub content_html: String,
}

/// Serve a content page by slug.
fn serve_content_page(state: &AppState, slug: &str) -> Result<ContentPageTemplate> {
    let page = state
        .content()
        .get_page(slug)
        .ok_or_else(|| AppError::NotFound(format!("page: {slug}")))?;

    Ok(ContentPageTemplate {
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        updated_at: page.meta.updated_at,
        content_html: page.content_html.clone(),
    })
}

/// Display the About page.
#[instrument(skip(state))]
pub async fn about(State(state): State<AppState>) -> Result<ContentPageTemplate> {
    serve_content_page(&state, "about")
}

/// Display the FAQ page.
#[instrument(skip(state))]
pub async fn faq(State(state): State<AppState>) -> Result<ContentPageTemplate> {
    serve_content_page(&state, "faq")
}

/// Display the Privacy Policy page.
#[instrument(skip(state))]
pub async fn privacy(State(state): State<AppState>) -> Result<ContentPageTemplate> {
    serve_content_page(&state, "privacy")
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/faq", get(faq))
        .route("/privacy", get(privacy))
}
