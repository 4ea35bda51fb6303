// Planet CRUD. Reads are public, writes need a session.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::app::AppState;
use crate::database::PlanetRepository;
use crate::form::decode_json;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::models::{Planet, PlanetInput};

/// GET /api/planets
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Planet>> {
    let planets = PlanetRepository::new(state.pool.clone()).select_all().await?;
    Ok(ApiResponse::success(planets))
}

/// GET /api/planets/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Planet> {
    let planet = PlanetRepository::new(state.pool.clone()).select_404(id).await?;
    Ok(ApiResponse::success(planet))
}

/// POST /api/planets
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<Value>,
) -> ApiResult<Planet> {
    let input: PlanetInput = decode_json(body).await?;

    let planet = PlanetRepository::new(state.pool.clone()).create(&input).await?;
    tracing::info!("User {} created planet {}", user.id, planet.id);
    Ok(ApiResponse::created(planet))
}

/// PUT /api/planets/:id
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> ApiResult<Planet> {
    let input: PlanetInput = decode_json(body).await?;

    let planet = PlanetRepository::new(state.pool.clone()).update_404(id, &input).await?;
    tracing::info!("User {} updated planet {}", user.id, planet.id);
    Ok(ApiResponse::success(planet))
}

/// DELETE /api/planets/:id
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Planet> {
    let planet = PlanetRepository::new(state.pool.clone()).delete_404(id).await?;
    tracing::info!("User {} deleted planet {}", user.id, planet.id);
    Ok(ApiResponse::success(planet))
}
