// src/handlers/auth.rs

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{error::AppError, view},
    config::AppState,
    middleware::auth::SESSION_COOKIE,
};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub async fn login_page(State(app_state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut ctx = view::page_context(&app_state, None).await;
    ctx.insert("error", &Option::<&str>::None);
    view::render(&app_state, "login.html", &ctx)
}

pub async fn login(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.username == app_state.admin_user && form.password == app_state.admin_pass {
        let session_id = app_state.sessions.create(&form.username);
        let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
            .path("/")
            .http_only(true)
            .build();
        return Ok((jar.add(cookie), Redirect::to("/")).into_response());
    }

    // Deliberately vague: never reveal which of the two fields was wrong
    let mut ctx = view::page_context(&app_state, None).await;
    ctx.insert("error", "Invalid username or password");
    Ok(view::render(&app_state, "login.html", &ctx)?.into_response())
}

pub async fn logout(State(app_state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(session_id) = Uuid::parse_str(cookie.value()) {
            app_state.sessions.destroy(session_id);
        }
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Redirect::to("/login"))
}
