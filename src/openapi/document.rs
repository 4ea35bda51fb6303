use serde_json::{json, Map, Value};

use crate::rpc::RemoteController;

use super::returns::{infer_response_schema, ResponseTypes};
use super::schema::SchemaRef;

/// An entity exposed through the CRUD API at `/api/<key>`.
#[derive(Debug, Clone, Copy)]
pub struct EntityDoc {
    pub key: &'static str,
    pub schema: SchemaRef,
    /// Body accepted by create and update; the entity itself unless set.
    pub input: SchemaRef,
}

impl EntityDoc {
    pub fn new(key: &'static str, schema: SchemaRef) -> Self {
        Self {
            key,
            schema,
            input: schema,
        }
    }

    pub fn with_input(mut self, input: SchemaRef) -> Self {
        self.input = input;
        self
    }
}

/// Fresh base document describing the CRUD routes of `entities`.
pub fn base_document(title: &str, version: &str, entities: &[EntityDoc]) -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();

    for entity in entities {
        let name = entity.schema.name();
        let reference = json!({ "$ref": format!("#/components/schemas/{}", name) });
        schemas.insert(name.to_string(), entity.schema.describe().to_json());

        let input_name = entity.input.name();
        let input_reference = json!({ "$ref": format!("#/components/schemas/{}", input_name) });
        schemas.insert(input_name.to_string(), entity.input.describe().to_json());

        paths.insert(
            format!("/api/{}", entity.key),
            json!({
                "get": {
                    "tags": [name],
                    "summary": format!("List {}", entity.key),
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": { "application/json": { "schema": envelope(json!({ "type": "array", "items": reference.clone() })) } }
                        }
                    }
                },
                "post": {
                    "tags": [name],
                    "summary": format!("Create {}", name),
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": input_reference.clone() } }
                    },
                    "responses": {
                        "201": {
                            "description": "Created",
                            "content": { "application/json": { "schema": envelope(reference.clone()) } }
                        },
                        "400": { "description": "Bad Request" },
                        "401": { "description": "Unauthorized" }
                    },
                    "security": [{ "bearerAuth": [] }]
                }
            }),
        );

        let id_param = json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" }
        }]);
        paths.insert(
            format!("/api/{}/{{id}}", entity.key),
            json!({
                "parameters": id_param,
                "get": {
                    "tags": [name],
                    "summary": format!("Get {}", name),
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": { "application/json": { "schema": envelope(reference.clone()) } }
                        },
                        "404": { "description": "Not Found" }
                    }
                },
                "put": {
                    "tags": [name],
                    "summary": format!("Update {}", name),
                    "requestBody": {
                        "required": true,
                        "content": { "application/json": { "schema": input_reference.clone() } }
                    },
                    "responses": {
                        "200": {
                            "description": "Successful response",
                            "content": { "application/json": { "schema": envelope(reference.clone()) } }
                        },
                        "400": { "description": "Bad Request" },
                        "401": { "description": "Unauthorized" },
                        "404": { "description": "Not Found" }
                    },
                    "security": [{ "bearerAuth": [] }]
                },
                "delete": {
                    "tags": [name],
                    "summary": format!("Delete {}", name),
                    "responses": {
                        "204": { "description": "Deleted" },
                        "401": { "description": "Unauthorized" },
                        "404": { "description": "Not Found" }
                    },
                    "security": [{ "bearerAuth": [] }]
                }
            }),
        );
    }

    json!({
        "openapi": "3.0.0",
        "info": { "title": title, "version": version },
        "paths": paths,
        "components": {
            "schemas": schemas,
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" }
            }
        }
    })
}

fn envelope(data: Value) -> Value {
    json!({
        "type": "object",
        "properties": {
            "success": { "type": "boolean" },
            "data": data
        },
        "required": ["success", "data"]
    })
}

/// Insert one `POST /api/<action>` entry per remote method into `base`.
///
/// Methods without an action path are skipped, as is a base that is not a
/// JSON object.
pub fn build_document(
    mut base: Value,
    controllers: &[RemoteController],
    response_types: &ResponseTypes,
) -> Value {
    let Some(doc) = base.as_object_mut() else {
        tracing::warn!("OpenAPI base document is not an object; leaving it untouched");
        return base;
    };

    let paths = doc
        .entry("paths")
        .or_insert_with(|| Value::Object(Map::new()));
    if !paths.is_object() {
        *paths = Value::Object(Map::new());
    }
    let Some(paths) = paths.as_object_mut() else {
        return base;
    };

    for controller in controllers {
        for method in controller.methods() {
            let Some(action) = method.action_url() else {
                continue;
            };
            let method_name = action.rsplit('/').next().unwrap_or(action);
            let response_schema =
                infer_response_schema(method, controller, method_name, response_types);

            paths.insert(
                format!("/api/{}", action),
                json!({
                    "post": {
                        "tags": [controller.name()],
                        "summary": method_name,
                        "description": format!("Backend method: {}", action),
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "type": "object" }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Successful response",
                                "content": {
                                    "application/json": {
                                        "schema": response_schema.to_json()
                                    }
                                }
                            },
                            "400": { "description": "Bad Request" },
                            "401": { "description": "Unauthorized" },
                            "403": { "description": "Forbidden" },
                            "500": { "description": "Internal Server Error" }
                        },
                        "security": [{ "bearerAuth": [] }]
                    }
                }),
            );
        }
    }

    base
}
