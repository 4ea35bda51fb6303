use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::is_development;
use crate::schema::{FieldKind, FieldMeta, SchemaDescription};

use super::{FormError, FormValue, FormValues};

/// Decode raw `(key, value)` pairs into a validated `T`.
pub async fn decode<T, I, K, V>(pairs: I) -> Result<T, FormError>
where
    T: SchemaDescription + DeserializeOwned,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    decode_values(FormValues::collapse(pairs)).await
}

/// Validate a JSON object body against `T` with the same field checks as a form.
///
/// Scalars are read as their text form and arrays as repeated keys; `null`
/// members count as absent.
pub async fn decode_json<T>(body: Value) -> Result<T, FormError>
where
    T: SchemaDescription + DeserializeOwned,
{
    let Value::Object(members) = body else {
        return Err(extraction_error("expected a JSON object".to_string()));
    };

    let mut pairs = Vec::new();
    for (key, value) in members {
        match value {
            Value::Array(items) => {
                pairs.extend(items.into_iter().filter_map(json_text).map(|v| (key.clone(), v)));
            }
            value => pairs.extend(json_text(value).map(|v| (key, v))),
        }
    }
    decode_values(FormValues::collapse(pairs)).await
}

/// Build and validate a `T` from already collapsed values.
pub async fn decode_values<T>(values: FormValues) -> Result<T, FormError>
where
    T: SchemaDescription + DeserializeOwned,
{
    let fields = match std::panic::catch_unwind(T::fields) {
        Ok(fields) => fields,
        Err(payload) => {
            return Err(extraction_error(format!(
                "field metadata unavailable for {}: {}",
                T::name(),
                panic_message(payload.as_ref()).unwrap_or("unknown error")
            )))
        }
    };

    let mut object: Map<String, Value> = values
        .iter()
        .map(|(key, value)| (key.clone(), value.to_json()))
        .collect();
    let mut conversion_errors: HashMap<&str, String> = HashMap::new();
    for field in &fields {
        let Some(value) = values.get(field.key) else {
            continue;
        };
        match coerce(field, value) {
            Ok(Some(json)) => {
                object.insert(field.key.to_string(), json);
            }
            Ok(None) => {
                object.remove(field.key);
            }
            Err(message) => {
                object.remove(field.key);
                conversion_errors.insert(field.key, message);
            }
        }
    }

    let instance = match serde_json::from_value::<T>(Value::Object(object)) {
        Ok(instance) => Some(instance),
        Err(e) if conversion_errors.is_empty() => return Err(extraction_error(e.to_string())),
        Err(e) => {
            tracing::debug!("{} not built from rejected values: {}", T::name(), e);
            None
        }
    };

    let mut errors = Vec::new();
    for field in &fields {
        let conversion = conversion_errors.get(field.key);
        check_field(field, values.get(field.key), conversion, &mut errors).await;
    }

    if let Some(confirmation) = T::password_confirmation() {
        let password = values.get(confirmation.password).cloned().unwrap_or_default();
        let confirm = values.get(confirmation.confirm).cloned().unwrap_or_default();
        if password != confirm {
            errors.push("Passwords don't match".to_string());
        }
    }

    if !errors.is_empty() {
        if is_development!() {
            tracing::error!("Validation errors for {}:", T::name());
            for error in &errors {
                tracing::error!("- {}", error);
            }
        }
        return Err(FormError::Invalid(errors));
    }

    instance.ok_or_else(|| extraction_error(format!("could not build {}", T::name())))
}

/// Shape a collapsed value the way the field's kind declares it.
/// `Ok(None)` leaves the key out so the schema's default applies.
fn coerce(field: &FieldMeta, value: &FormValue) -> Result<Option<Value>, String> {
    let text = match value {
        FormValue::Multiple(_) if field.multiple => return Ok(Some(value.to_json())),
        FormValue::Multiple(_) => {
            return Err(format!("{} must have a single value.", field.label()));
        }
        FormValue::Single(text) => text,
    };

    if field.kind.is_textual() || field.multiple {
        return Ok(Some(Value::String(text.clone())));
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match field.kind {
        FieldKind::Number => parse_number(trimmed)
            .map(|n| Some(Value::Number(n)))
            .ok_or_else(|| format!("{} must be a number.", field.label())),
        FieldKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Ok(Some(Value::Bool(true))),
            "false" | "off" | "no" | "0" => Ok(Some(Value::Bool(false))),
            _ => Err(format!("{} must be true or false.", field.label())),
        },
        FieldKind::Date => parse_date(trimmed)
            .map(|date| Some(Value::String(date.to_rfc3339())))
            .ok_or_else(|| format!("{} must be a valid date.", field.label())),
        FieldKind::Text | FieldKind::Email | FieldKind::Password => {
            Ok(Some(Value::String(text.clone())))
        }
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(Number::from(n));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// RFC 3339 timestamps, or a bare `YYYY-MM-DD` taken as midnight UTC.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    let midnight = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

fn json_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

async fn check_field(
    field: &FieldMeta,
    value: Option<&FormValue>,
    conversion: Option<&String>,
    errors: &mut Vec<String>,
) {
    if field.required && !value.is_some_and(FormValue::is_truthy) {
        errors.push(format!("{} is required.", field.label()));
        return;
    }

    if let Some(message) = conversion {
        errors.push(message.clone());
        return;
    }

    if field.kind.is_textual() {
        if let (Some(min_length), Some(s)) = (field.min_length, value.and_then(FormValue::as_str)) {
            if min_length > 0 && s.chars().count() < min_length {
                errors.push(format!(
                    "{} must be at least {} characters.",
                    field.label(),
                    min_length
                ));
            }
        }
    }

    let Some(validator) = &field.validator else {
        return;
    };

    let outcome = AssertUnwindSafe(validator.run(value.cloned()))
        .catch_unwind()
        .await;
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(message)) if !message.is_empty() => errors.push(message),
        Ok(Err(_)) => errors.push(format!("Validation failed for {}", field.key)),
        Err(payload) => {
            tracing::warn!("Validator for '{}' panicked", field.key);
            errors.push(
                panic_message(payload.as_ref())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Validation failed for {}", field.key)),
            );
        }
    }
}

pub(crate) fn extraction_error(message: String) -> FormError {
    if is_development!() {
        tracing::error!("Error extracting form data: {}", message);
    }
    FormError::Extraction(message)
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<&str> {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .filter(|s| !s.is_empty())
}
