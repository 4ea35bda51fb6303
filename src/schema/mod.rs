pub mod field;
pub mod validators;

pub use field::{FieldKind, FieldMeta, Validator};

/// A structural template whose fields carry validation and documentation metadata.
///
/// Implementors are constructed fresh (`Default`) for every decode or describe
/// call and expose their field descriptors in declaration order.
pub trait SchemaDescription: Default {
    /// Name used for tags and component titles in generated documentation.
    fn name() -> &'static str;

    fn fields() -> Vec<FieldMeta>;

    /// Opt-in pair of fields that must carry equal values.
    fn password_confirmation() -> Option<PasswordConfirmation> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfirmation {
    pub password: &'static str,
    pub confirm: &'static str,
}

impl Default for PasswordConfirmation {
    fn default() -> Self {
        Self {
            password: "password",
            confirm: "confirm_password",
        }
    }
}
