// handlers/public/mod.rs - Public handlers (no session required)

pub mod auth;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::config;
use crate::database::DatabaseManager;
use crate::handlers::pages;
use crate::openapi;

pub async fn root() -> Html<String> {
    Html(pages::home(&config::config().docs.title))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "database": "connected",
                "status": "ok",
                "timestamp": timestamp
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "database": "disconnected",
                    "status": "error",
                    "timestamp": timestamp
                })),
            )
        }
    }
}

/// Generated document, rebuilt from the registry on every request.
pub async fn openapi_json(State(state): State<AppState>) -> Json<Value> {
    Json(openapi::api_document(&state.registry))
}

pub async fn auth_reference() -> Json<Value> {
    Json(openapi::auth_document())
}
