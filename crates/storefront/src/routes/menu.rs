//! Menu route handlers.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::Query;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use bento_bop_core::MenuItemId;

use crate::catalog::{self, CategoryId};
use crate::error::Result;
use crate::filters;
use crate::models::session as session_state;

/// Category tab display data for templates.
#[derive(Clone)]
pub struct CategoryView {
    pub slug: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub price: String,
    pub image: &'static str,
    /// Quantity of this item already in the cart (0 when absent).
    pub in_cart: u32,
}

/// Category filter query.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
}

/// Menu listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "menu/index.html")]
pub struct MenuIndexTemplate {
    pub categories: Vec<CategoryView>,
    pub items: Vec<MenuItemView>,
}

/// Display the menu, filtered to one category tab.
///
/// An unknown category slug falls back to the first tab rather than erroring;
/// the tabs are the only way the parameter is normally set.
#[instrument(skip(session))]
pub async fn index(
    session: Session,
    Query(query): Query<MenuQuery>,
) -> Result<MenuIndexTemplate> {
    let active = query
        .category
        .as_deref()
        .and_then(|slug| slug.parse::<CategoryId>().ok())
        .unwrap_or(CategoryId::Bento);

    let cart = session_state::load_cart(&session).await?;
    let quantities: HashMap<MenuItemId, u32> = cart
        .lines()
        .iter()
        .map(|line| (line.id, line.quantity))
        .collect();

    let categories = CategoryId::all()
        .into_iter()
        .map(|category| CategoryView {
            slug: category.as_str(),
            label: category.label(),
            icon: category.icon(),
            active: category == active,
        })
        .collect();

    let items = catalog::items_in_category(active)
        .into_iter()
        .map(|item| MenuItemView {
            id: item.id.as_i32(),
            name: item.name,
            description: item.description,
            price: item.price.to_string(),
            image: item.image,
            in_cart: quantities.get(&item.id).copied().unwrap_or(0),
        })
        .collect();

    Ok(MenuIndexTemplate { categories, items })
}
