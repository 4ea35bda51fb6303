use serde_json::{json, Value};

use crate::database::PlanetRepository;
use crate::models::Planet;
use crate::openapi::ResponseType;
use crate::rpc::{Allowed, RemoteController, RemoteMethod, RpcCall, RpcError};

pub async fn count_planets(call: RpcCall) -> Result<Value, RpcError> {
    let count = PlanetRepository::new(call.pool).count().await?;
    Ok(json!(count))
}

pub async fn ringed_planets(call: RpcCall) -> Result<Value, RpcError> {
    let planets = PlanetRepository::new(call.pool).select_ringed().await?;
    serde_json::to_value(planets).map_err(|e| RpcError::Failed(e.to_string()))
}

pub fn controller() -> RemoteController {
    RemoteController::new("PlanetsController")
        .method(
            RemoteMethod::new("countPlanets", Allowed::Always, count_planets)
                .returns(ResponseType::number()),
        )
        .method(
            RemoteMethod::new("ringedPlanets", Allowed::Authenticated, ringed_planets)
                .returns(ResponseType::array_of::<Planet>()),
        )
}
