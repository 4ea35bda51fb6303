use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::AuthProvider;
use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::session_middleware;
use crate::rpc::{self, ControllerRegistry};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth: Arc<dyn AuthProvider>,
    pub registry: Arc<ControllerRegistry>,
}

impl AppState {
    pub fn new(pool: PgPool, auth: Arc<dyn AuthProvider>, registry: ControllerRegistry) -> Self {
        Self {
            pool,
            auth,
            registry: Arc::new(registry),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = config::config();

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/api/health", get(public::health))
        .merge(docs_routes())
        .merge(auth_routes())
        // Session-aware
        .merge(admin_routes())
        .merge(planet_routes())
        .merge(rpc::routes(&state.registry))
        // Global middleware
        .layer(middleware::from_fn_with_state(state.clone(), session_middleware))
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn docs_routes() -> Router<AppState> {
    Router::new()
        .route("/api/openapi.json", get(public::openapi_json))
        .route("/api/auth/open-api/generate-schema", get(public::auth_reference))
        .route("/api/docs", get(protected::docs))
}

fn auth_routes() -> Router<AppState> {
    use crate::handlers::public::auth;

    Router::new()
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin", get(protected::admin))
}

fn planet_routes() -> Router<AppState> {
    use crate::handlers::protected::planets;

    Router::new()
        .route("/api/planets", get(planets::list).post(planets::create))
        .route(
            "/api/planets/:id",
            get(planets::show).put(planets::update).delete(planets::remove),
        )
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
