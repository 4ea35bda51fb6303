// handlers/public/auth/mod.rs - Browser authentication flows
//
// Form posts are decoded and validated before the auth provider is called.
// Success redirects to /admin with a session cookie; any failure is a 400
// with the message in the error envelope.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};

use crate::app::AppState;
use crate::auth::{LoginForm, RegistrationForm};
use crate::error::ApiError;
use crate::form::extract_form_data;
use crate::handlers::{found, pages};
use crate::middleware::{clear_session_cookie, session_cookie, session_token, Locals};

/// GET /auth/login
pub async fn login_page(locals: Locals) -> Response {
    if locals.user.is_some() {
        return found("/admin", None);
    }
    Html(pages::login()).into_response()
}

/// POST /auth/login
pub async fn login(State(state): State<AppState>, request: Request) -> Result<Response, ApiError> {
    let form: LoginForm = extract_form_data(request).await?;

    let session = state.auth.sign_in_email(form.into()).await.map_err(|e| {
        tracing::info!("Sign-in rejected: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("User {} signed in", session.user.id);
    Ok(found("/admin", session_cookie(&session.token)))
}

/// GET /auth/register
pub async fn register_page(locals: Locals) -> Response {
    if locals.user.is_some() {
        return found("/admin", None);
    }
    Html(pages::register()).into_response()
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, ApiError> {
    let form: RegistrationForm = extract_form_data(request).await?;

    let session = state.auth.sign_up_email(form.into()).await.map_err(|e| {
        tracing::info!("Registration rejected: {}", e);
        ApiError::from(e)
    })?;

    tracing::info!("User {} registered", session.user.id);
    Ok(found("/admin", session_cookie(&session.token)))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.auth.sign_out(&token).await {
            tracing::warn!("Sign-out failed: {}", e);
        }
    }
    found("/", clear_session_cookie())
}
