// src/common/view.rs

use axum::response::Html;
use tera::Context;

use crate::{common::error::AppError, config::AppState, services::session::SessionUser};

/// Builds the base context every rendered page shares: the signed-in
/// username and the company profile row for header branding. A failed
/// company lookup is logged and tolerated.
pub async fn page_context(app_state: &AppState, user: Option<&SessionUser>) -> Context {
    let mut ctx = Context::new();
    ctx.insert("username", &user.map(|u| u.username.as_str()));

    let company = match app_state.company_repo.get().await {
        Ok(company) => company,
        Err(e) => {
            tracing::error!("Error loading company profile: {e:?}");
            None
        }
    };
    ctx.insert("company", &company);

    ctx
}

pub fn render(app_state: &AppState, template: &str, ctx: &Context) -> Result<Html<String>, AppError> {
    Ok(Html(app_state.templates.render(template, ctx)?))
}
