//! Authentication handlers
//!
//! Login forwards the credentials to the backend and stores the returned
//! bearer token in an httpOnly session cookie, so the browser never sees it.
//! Logout clears the cookie without calling the backend at all.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use serde_json::Value;
use time::Duration;

use shared::LoginCredentials;

use crate::error::{AppError, AppResult};
use crate::middleware::SESSION_COOKIE;
use crate::AppState;

#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// POST /api/auth/login
///
/// Credentials go to the backend untouched; its validation errors come back
/// with their original status. On success the token is kept server-side in
/// the session cookie and only the message and user profile are returned.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<LoginCredentials>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let client = state.require_upstream()?;
    let reply = client
        .post_public("/login", &credentials, "logging in")
        .await?
        .ok_or_upstream("Login failed")?;

    let token = reply
        .body
        .get("token")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::Transport("Unexpected error when logging in".to_string()))?
        .to_string();
    let user = reply.body.get("user").cloned();

    let jar = jar.add(session_cookie(
        token,
        state.config.session.cookie_max_age_seconds,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user,
        }),
    ))
}

/// POST /api/auth/logout
///
/// Always succeeds, even without a session: the cookie is overwritten with
/// an immediately expiring empty value.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.add(expired_session_cookie());

    (
        jar,
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
        }),
    )
}

fn session_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(max_age_seconds))
        .build()
}

fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
