//! Form submission decoding and validation.
//!
//! A submission is read as ordered `(key, value)` pairs, collapsed so that a
//! repeated key becomes a sequence, turned into an instance of a
//! [`SchemaDescription`](crate::schema::SchemaDescription) and checked against
//! that schema's field metadata. Failures are returned, never raised.

pub mod decode;
pub mod extract;
pub mod values;

pub use decode::{decode, decode_json, decode_values};
pub use extract::{extract_form_data, read_form_pairs};
pub use values::{FormValue, FormValues};

/// Why a submission could not be turned into a validated instance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// One or more user-correctable validation messages, in field order.
    #[error("{}", .0.join(", "))]
    Invalid(Vec<String>),

    /// The body could not be read or the instance could not be built.
    #[error("Error extracting form data: {0}")]
    Extraction(String),
}

impl FormError {
    /// Individual validation messages; empty for extraction failures.
    pub fn messages(&self) -> &[String] {
        match self {
            FormError::Invalid(errors) => errors,
            FormError::Extraction(_) => &[],
        }
    }
}
