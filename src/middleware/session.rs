use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;

use crate::app::AppState;
use crate::auth::{Session, User};
use crate::config;
use crate::error::ApiError;

/// Per-request authentication state, filled in by [`session_middleware`].
#[derive(Debug, Clone, Default)]
pub struct Locals {
    pub user: Option<User>,
    pub session: Option<Session>,
}

impl Locals {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some() && self.session.is_some()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Locals {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Locals>().cloned().unwrap_or_default())
    }
}

/// The signed-in user; rejects with 401 when there is no live session.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let locals = Locals::from_request_parts(parts, state).await.unwrap_or_default();
        match locals {
            Locals { user: Some(user), session: Some(_) } => Ok(CurrentUser(user)),
            _ => Err(ApiError::unauthorized("Unauthorized")),
        }
    }
}

/// Resolve the session token (cookie or bearer header) into [`Locals`].
/// Lookup failures leave the request anonymous.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut locals = Locals::default();

    if let Some(token) = session_token(request.headers()) {
        match state.auth.get_session(&token).await {
            Ok(Some((user, session))) => {
                locals = Locals { user: Some(user), session: Some(session) };
            }
            Ok(None) => tracing::debug!("Ignoring unknown or expired session token"),
            Err(e) => tracing::warn!("Session lookup failed: {}", e),
        }
    }

    request.extensions_mut().insert(locals);
    next.run(request).await
}

/// Session token from the session cookie, falling back to `Authorization: Bearer`.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_name = &config::config().security.session_cookie_name;

    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name.as_str() && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// `Set-Cookie` value carrying a new session token.
pub fn session_cookie(token: &str) -> Option<HeaderValue> {
    let security = &config::config().security;
    let hours = security.session_expiry_hours.min(config::MAX_SESSION_EXPIRY_HOURS);
    let max_age = hours.saturating_mul(3600);
    build_cookie(token, max_age)
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie() -> Option<HeaderValue> {
    build_cookie("", 0)
}

fn build_cookie(value: &str, max_age: u64) -> Option<HeaderValue> {
    let security = &config::config().security;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        security.session_cookie_name, value, max_age
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}
