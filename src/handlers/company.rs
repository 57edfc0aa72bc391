// src/handlers/company.rs

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};

use crate::{
    common::{error::AppError, view},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::company::CompanyInput,
    services::upload_service,
};

/// GET /company
pub async fn company_page(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<String>, AppError> {
    // page_context already loads the company row for the header; the form
    // reuses the same record.
    let ctx = view::page_context(&app_state, Some(&user)).await;
    view::render(&app_state, "company_form.html", &ctx)
}

/// POST /company (multipart, optional `logo` file)
pub async fn save_company(
    State(app_state): State<AppState>,
    AuthenticatedUser(_user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut input = CompanyInput::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("name") => input.name = Some(field.text().await?),
            Some("tin") => input.tin = Some(field.text().await?),
            Some("address") => input.address = Some(field.text().await?),
            Some("phone") => input.phone = Some(field.text().await?),
            Some("logo") => {
                match upload_service::save_logo(&app_state.upload_dir, field).await {
                    Ok(stored) => input.logo = stored,
                    // A failed upload never blocks saving the profile itself
                    Err(e) => tracing::error!("Logo upload error: {e:?}"),
                }
            }
            _ => {}
        }
    }

    match app_state.company_repo.get().await? {
        Some(existing) => app_state.company_repo.update(existing.id, &input).await?,
        None => app_state.company_repo.create(&input).await?,
    };

    Ok(Redirect::to("/company"))
}
