// src/handlers/account.rs

use axum::{
    extract::{Multipart, State},
    response::{Html, Redirect},
};

use crate::{
    common::{error::AppError, view},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    services::upload_service,
};

/// GET /account
pub async fn account_page(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Html<String>, AppError> {
    let ctx = view::page_context(&app_state, Some(&user)).await;
    view::render(&app_state, "account.html", &ctx)
}

/// POST /account (multipart, optional `avatar` file)
///
/// Upload problems are logged; the redirect back to the account page
/// happens regardless.
pub async fn save_account(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    mut multipart: Multipart,
) -> Redirect {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field.name().map(|n| n.to_string());
                if name.as_deref() == Some("avatar") {
                    if let Err(e) =
                        upload_service::save_avatar(&app_state.upload_dir, &user.username, field)
                            .await
                    {
                        tracing::error!("Avatar upload error: {e:?}");
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Avatar upload error: {e:?}");
                break;
            }
        }
    }

    Redirect::to("/account")
}
