// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use uuid::Uuid;

use crate::{config::AppState, services::session::SessionUser};

/// Name of the session cookie. The signed value is the opaque session id.
pub const SESSION_COOKIE: &str = "sid";

/// Session wall for every protected route: requests without a live session
/// are sent back to the login page.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&app_state, &jar) {
        Some(user) => {
            // Hand the signed-in user to handlers via request extensions
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => Redirect::to("/login").into_response(),
    }
}

/// Resolves the session cookie to its server-side record, if any.
pub fn session_user(app_state: &AppState, jar: &SignedCookieJar) -> Option<SessionUser> {
    let cookie = jar.get(SESSION_COOKIE)?;
    let session_id = Uuid::parse_str(cookie.value()).ok()?;
    app_state.sessions.get(session_id)
}

/// Extractor for the authenticated user placed there by `auth_guard`.
pub struct AuthenticatedUser(pub SessionUser);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
