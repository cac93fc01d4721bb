//! Session middleware.
//!
//! Every protected route runs behind one of two layers. [`require_token`]
//! only checks that the session cookie is present and makes the raw token
//! available to handlers. [`resolve_identity`] additionally asks the backend
//! who the caller is, so warehouse scoping can be applied.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{error::AppError, AppState};

/// Name of the cookie that carries the backend bearer token.
pub const SESSION_COOKIE: &str = "token";

/// Raw bearer token taken from the session cookie.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn cookie_token(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Rejects requests without a session cookie.
///
/// On success the token is inserted into request extensions as
/// [`SessionToken`]; the identity behind it is not resolved here.
pub async fn require_token(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    if state.upstream.is_none() {
        return AppError::MissingBackendConfig.into_response();
    }

    let Some(token) = cookie_token(&jar) else {
        return AppError::MissingToken.into_response();
    };

    request.extensions_mut().insert(SessionToken(token));
    next.run(request).await
}

/// Rejects requests without a session cookie and resolves the caller.
///
/// The backend is asked for the current user on every request; nothing is
/// cached. Handlers downstream receive both the [`SessionToken`] and the
/// resolved [`shared::SessionIdentity`] through extensions.
pub async fn resolve_identity(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let client = match state.require_upstream() {
        Ok(client) => client,
        Err(err) => return err.into_response(),
    };

    let Some(token) = cookie_token(&jar) else {
        return AppError::MissingToken.into_response();
    };

    let identity = match client.fetch_identity(&token).await {
        Ok(identity) => identity,
        Err(err) => return err.into_response(),
    };

    request.extensions_mut().insert(SessionToken(token));
    request.extensions_mut().insert(identity);
    next.run(request).await
}
