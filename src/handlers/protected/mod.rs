// handlers/protected/mod.rs - Handlers that need a live session

pub mod planets;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use serde_json::json;

use crate::handlers::{found, pages};
use crate::middleware::Locals;

/// GET /admin
pub async fn admin(locals: Locals) -> Response {
    match locals.user {
        Some(user) => Html(pages::admin(&user.name)).into_response(),
        None => found("/auth/login", None),
    }
}

/// GET /api/docs
pub async fn docs(locals: Locals) -> Response {
    if !locals.is_signed_in() {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" }))).into_response();
    }
    Html(pages::api_reference()).into_response()
}
