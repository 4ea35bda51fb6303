use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::schema::{FieldKind, FieldMeta, SchemaDescription};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

/// JSON-Schema-like shape description used in the OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, StructuralSchema>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<StructuralSchema>>,
}

impl StructuralSchema {
    pub fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            format: None,
            properties: None,
            required: None,
            items: None,
        }
    }

    /// Bare `{type: object}`, the fallback for anything that cannot be described.
    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::of(SchemaType::Number)
    }

    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    pub fn date_time() -> Self {
        Self {
            format: Some("date-time".to_string()),
            ..Self::string()
        }
    }

    pub fn array(items: StructuralSchema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({ "type": "object" }))
    }
}

impl From<FieldKind> for StructuralSchema {
    fn from(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Number => StructuralSchema::number(),
            FieldKind::Boolean => StructuralSchema::boolean(),
            FieldKind::Date => StructuralSchema::date_time(),
            FieldKind::Text | FieldKind::Email | FieldKind::Password => StructuralSchema::string(),
        }
    }
}

/// Describe a schema description's fields as an object schema.
///
/// Never panics: if constructing the schema or enumerating its fields
/// fails, the result is a bare `{type: object}`.
pub fn describe_schema<S: SchemaDescription>() -> StructuralSchema {
    let introspected = std::panic::catch_unwind(|| {
        let _instance = S::default();
        S::fields()
    });

    match introspected {
        Ok(fields) => describe_fields(&fields),
        Err(_) => {
            tracing::debug!("Schema introspection failed; falling back to a generic object");
            StructuralSchema::object()
        }
    }
}

pub fn describe_fields(fields: &[FieldMeta]) -> StructuralSchema {
    let mut properties = BTreeMap::new();
    let mut required = Vec::new();

    for field in fields {
        properties.insert(field.key.to_string(), StructuralSchema::from(field.kind));
        if field.required {
            required.push(field.key.to_string());
        }
    }

    StructuralSchema {
        properties: Some(properties),
        required: (!required.is_empty()).then_some(required),
        ..StructuralSchema::object()
    }
}

/// Type-erased handle to a schema description, stored in response-type metadata.
#[derive(Clone, Copy)]
pub struct SchemaRef {
    name: fn() -> &'static str,
    describe: fn() -> StructuralSchema,
}

impl SchemaRef {
    pub fn of<S: SchemaDescription>() -> Self {
        Self {
            name: S::name,
            describe: describe_schema::<S>,
        }
    }

    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    pub fn describe(&self) -> StructuralSchema {
        (self.describe)()
    }
}

impl fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.name()).finish()
    }
}
