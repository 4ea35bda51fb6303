use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Locals;

use super::{ControllerRegistry, RemoteMethod, RpcCall, RpcError};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RpcBody {
    pub args: Vec<Value>,
}

/// One `POST /api/<Controller>/<method>` route per registered method.
pub fn routes(registry: &ControllerRegistry) -> Router<AppState> {
    let mut router = Router::new();

    for controller in registry.controllers() {
        for method in controller.methods() {
            let Some(action) = method.action_url() else {
                continue;
            };
            let path = format!("/api/{}", action);
            tracing::debug!("Mounting remote method at {}", path);

            let method = method.clone();
            router = router.route(
                &path,
                post(
                    move |State(state): State<AppState>,
                          locals: Locals,
                          headers: HeaderMap,
                          body: Bytes| {
                        let method = method.clone();
                        async move { invoke(method, state, locals, &headers, &body).await }
                    },
                ),
            );
        }
    }

    router
}

async fn invoke(
    method: RemoteMethod,
    state: AppState,
    locals: Locals,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Json<Value>, ApiError> {
    let body = parse_body(headers, body).map_err(|e| {
        tracing::debug!("Rejected arguments for {}: {}", method.name(), e);
        ApiError::from(e)
    })?;
    let call = RpcCall {
        args: body.args,
        user: locals.user,
        pool: state.pool.clone(),
    };

    let result = method.invoke(call).await.map_err(|e| {
        tracing::debug!("Remote method {} failed: {}", method.name(), e);
        ApiError::from(e)
    })?;
    Ok(Json(result))
}

/// An empty body means no arguments; anything else must be a JSON `{"args": [...]}`.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> Result<RpcBody, RpcError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RpcBody::default());
    }

    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .is_some_and(|mime| mime == "application/json" || mime.ends_with("+json"));
    if !is_json {
        return Err(RpcError::InvalidArguments(
            "Expected request with `Content-Type: application/json`".to_string(),
        ));
    }

    Json::<RpcBody>::from_bytes(body)
        .map(|Json(body)| body)
        .map_err(|rejection: JsonRejection| RpcError::InvalidArguments(rejection.body_text()))
}
