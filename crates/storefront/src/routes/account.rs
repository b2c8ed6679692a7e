//! Account route handlers.
//!
//! These routes require sign-in. The "account" is whatever this session
//! has done: profile details entered at sign-in plus the orders placed here.

use askama::Template;
use askama_web::WebTemplate;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::session as session_state;

/// User display data for templates.
#[derive(Clone)]
pub struct UserView {
    pub name: String,
    pub email: String,
}

/// Order history row for templates.
#[derive(Clone)]
pub struct OrderRowView {
    pub number: String,
    pub placed_at: String,
    pub item_count: u32,
    pub total: String,
    pub status: &'static str,
}

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub user: UserView,
    pub orders: Vec<OrderRowView>,
}

/// Display the account overview: profile plus this session's orders.
#[instrument(skip(session, current_user))]
pub async fn index(
    session: Session,
    RequireAuth(current_user): RequireAuth,
) -> Result<AccountIndexTemplate> {
    let orders = session_state::order_history(&session)
        .await?
        .iter()
        .rev() // newest first
        .map(|order| OrderRowView {
            number: order.number(),
            placed_at: order.created_at.format("%b %-d, %Y").to_string(),
            item_count: order.lines.iter().map(|line| line.quantity).sum(),
            total: order.totals.total.to_string(),
            status: order.status.label(),
        })
        .collect();

    Ok(AccountIndexTemplate {
        user: UserView {
            name: current_user.name,
            email: current_user.email.to_string(),
        },
        orders,
    })
}
