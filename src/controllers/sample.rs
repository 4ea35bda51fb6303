use serde_json::{json, Value};

use crate::rpc::{Allowed, RemoteController, RemoteMethod, RpcCall, RpcError};

pub async fn get_sample(_call: RpcCall) -> Result<Value, RpcError> {
    Ok(json!("Hello, world!"))
}

pub fn controller() -> RemoteController {
    RemoteController::new("SampleController")
        .method(RemoteMethod::new("getSample", Allowed::Always, get_sample))
}
