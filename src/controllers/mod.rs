//! Remote controllers exposed under `/api/<Controller>/<method>`.

pub mod planets;
pub mod sample;

use crate::openapi::ResponseType;
use crate::rpc::ControllerRegistry;

/// Every controller the server exposes, with its documented response types.
pub fn registry() -> ControllerRegistry {
    ControllerRegistry::new()
        .register(sample::controller())
        .register(planets::controller())
        .returns("SampleController", "getSample", ResponseType::string())
}
