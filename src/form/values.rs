use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One submitted form value: a scalar until the same key shows up again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FormValue {
    /// Append another value for the same key, promoting a scalar to a sequence.
    pub fn push(&mut self, value: String) {
        match self {
            FormValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FormValue::Multiple(vec![first, value]);
            }
            FormValue::Multiple(values) => values.push(value),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormValue::Single(s) => Some(s),
            FormValue::Multiple(_) => None,
        }
    }

    /// Empty strings are the only falsy form values; sequences always count as present.
    pub fn is_truthy(&self) -> bool {
        match self {
            FormValue::Single(s) => !s.is_empty(),
            FormValue::Multiple(_) => true,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Single(s) => Value::String(s.clone()),
            FormValue::Multiple(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

impl Default for FormValue {
    fn default() -> Self {
        FormValue::Single(String::new())
    }
}

/// Single-valued view over a multi-valued form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, FormValue>);

impl FormValues {
    /// Collapse `(key, value)` pairs in submission order.
    pub fn collapse<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut values: BTreeMap<String, FormValue> = BTreeMap::new();
        for (key, value) in pairs {
            let key: String = key.into();
            let value: String = value.into();
            match values.get_mut(&key) {
                Some(existing) => existing.push(value),
                None => {
                    values.insert(key, FormValue::Single(value));
                }
            }
        }
        Self(values)
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FormValue)> {
        self.0.iter()
    }

    /// JSON object handed to serde when building the typed instance.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}
