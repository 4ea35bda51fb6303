use std::collections::HashMap;

use crate::rpc::{RemoteController, RemoteMethod};
use crate::schema::SchemaDescription;

use super::schema::{SchemaRef, StructuralSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Number,
    Boolean,
    Object,
}

/// Declared result type of a remote-callable method. Documentation only.
#[derive(Debug, Clone, Copy)]
pub enum ResponseType {
    Primitive(PrimitiveKind),
    Schema { schema: SchemaRef, is_array: bool },
}

impl ResponseType {
    pub fn string() -> Self {
        ResponseType::Primitive(PrimitiveKind::String)
    }

    pub fn number() -> Self {
        ResponseType::Primitive(PrimitiveKind::Number)
    }

    pub fn boolean() -> Self {
        ResponseType::Primitive(PrimitiveKind::Boolean)
    }

    pub fn object() -> Self {
        ResponseType::Primitive(PrimitiveKind::Object)
    }

    pub fn schema<S: SchemaDescription>() -> Self {
        ResponseType::Schema {
            schema: SchemaRef::of::<S>(),
            is_array: false,
        }
    }

    pub fn array_of<S: SchemaDescription>() -> Self {
        ResponseType::Schema {
            schema: SchemaRef::of::<S>(),
            is_array: true,
        }
    }

    pub fn to_schema(&self) -> StructuralSchema {
        match self {
            ResponseType::Schema { schema, is_array: true } => StructuralSchema::array(schema.describe()),
            ResponseType::Schema { schema, is_array: false } => schema.describe(),
            ResponseType::Primitive(PrimitiveKind::String) => StructuralSchema::string(),
            ResponseType::Primitive(PrimitiveKind::Number) => StructuralSchema::number(),
            ResponseType::Primitive(PrimitiveKind::Boolean) => StructuralSchema::boolean(),
            ResponseType::Primitive(PrimitiveKind::Object) => StructuralSchema::object(),
        }
    }
}

/// Explicit `(controller, method) -> response type` registrations.
///
/// Filled while controllers are registered at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ResponseTypes(HashMap<(String, String), ResponseType>);

impl ResponseTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: &str, method: &str, response_type: ResponseType) {
        self.0
            .insert((controller.to_string(), method.to_string()), response_type);
    }

    pub fn get(&self, controller: &str, method: &str) -> Option<&ResponseType> {
        self.0.get(&(controller.to_string(), method.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolve the documented 200 response schema for `method`.
///
/// Lookup order: the explicit registration for `(controller, method_name)`,
/// then the declaration carried by `method`, then the declaration on the
/// controller's own method of that name. Falls back to `{type: object}`.
pub fn infer_response_schema(
    method: &RemoteMethod,
    controller: &RemoteController,
    method_name: &str,
    response_types: &ResponseTypes,
) -> StructuralSchema {
    response_types
        .get(controller.name(), method_name)
        .or_else(|| method.response_type())
        .or_else(|| {
            controller
                .get(method_name)
                .and_then(RemoteMethod::response_type)
        })
        .map(ResponseType::to_schema)
        .unwrap_or_else(StructuralSchema::object)
}
