//! OpenAPI document synthesis.
//!
//! Schema descriptions are turned into structural schemas, remote methods
//! get their response schema from registered response types, and everything
//! is assembled into a JSON document served at `/api/openapi.json`.

pub mod document;
pub mod returns;
pub mod schema;

use serde_json::{json, Value};

use crate::auth::forms::{LoginForm, RegistrationForm};
use crate::config;
use crate::models::{Planet, PlanetInput};
use crate::rpc::ControllerRegistry;

pub use document::{base_document, build_document, EntityDoc};
pub use returns::{infer_response_schema, PrimitiveKind, ResponseType, ResponseTypes};
pub use schema::{describe_fields, describe_schema, SchemaRef, SchemaType, StructuralSchema};

/// Entities served by the CRUD API.
pub fn entities() -> Vec<EntityDoc> {
    vec![EntityDoc::new("planets", SchemaRef::of::<Planet>())
        .with_input(SchemaRef::of::<PlanetInput>())]
}

/// The full API document: entity CRUD routes plus every registered remote method.
pub fn api_document(registry: &ControllerRegistry) -> Value {
    let docs = &config::config().docs;
    let base = base_document(&docs.title, &docs.version, &entities());
    build_document(base, registry.controllers(), registry.response_types())
}

/// Reference document for the form-based authentication routes.
pub fn auth_document() -> Value {
    let docs = &config::config().docs;
    let form_body = |schema: StructuralSchema| {
        json!({
            "required": true,
            "content": {
                "application/x-www-form-urlencoded": { "schema": schema.to_json() },
                "multipart/form-data": { "schema": schema.to_json() }
            }
        })
    };
    let failure = json!({
        "description": "Validation or authentication failure",
        "content": {
            "application/json": {
                "schema": {
                    "type": "object",
                    "properties": {
                        "success": { "type": "boolean" },
                        "error": { "type": "string" },
                        "code": { "type": "string" }
                    }
                }
            }
        }
    });
    let redirect = |to: &str| {
        json!({
            "description": format!("Redirect to {}", to),
            "headers": { "Set-Cookie": { "schema": { "type": "string" } } }
        })
    };

    json!({
        "openapi": "3.0.0",
        "info": { "title": format!("{} authentication", docs.title), "version": docs.version },
        "paths": {
            "/auth/login": {
                "post": {
                    "tags": ["Authentication"],
                    "summary": "Sign in with email and password",
                    "requestBody": form_body(describe_schema::<LoginForm>()),
                    "responses": { "302": redirect("/admin"), "400": failure.clone() }
                }
            },
            "/auth/register": {
                "post": {
                    "tags": ["Authentication"],
                    "summary": "Create an account with email and password",
                    "requestBody": form_body(describe_schema::<RegistrationForm>()),
                    "responses": { "302": redirect("/admin"), "400": failure }
                }
            },
            "/logout": {
                "post": {
                    "tags": ["Authentication"],
                    "summary": "End the current session",
                    "responses": { "302": redirect("/") }
                }
            }
        }
    })
}
