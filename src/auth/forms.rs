use serde::{Deserialize, Serialize};

use crate::schema::{validators, FieldMeta, PasswordConfirmation, SchemaDescription};

use super::{SignInEmail, SignUpEmail};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl SchemaDescription for LoginForm {
    fn name() -> &'static str {
        "LoginForm"
    }

    fn fields() -> Vec<FieldMeta> {
        vec![
            FieldMeta::email("email")
                .caption("Email address")
                .required()
                .validate(validators::email("Invalid email address.")),
            FieldMeta::password("password").caption("Password").required(),
        ]
    }
}

impl From<LoginForm> for SignInEmail {
    fn from(form: LoginForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SchemaDescription for RegistrationForm {
    fn name() -> &'static str {
        "RegistrationForm"
    }

    fn fields() -> Vec<FieldMeta> {
        vec![
            FieldMeta::text("name")
                .caption("Name")
                .required()
                .validate(validators::max_length(100, "Name must be at most 100 characters.")),
            FieldMeta::email("email")
                .caption("Email address")
                .required()
                .validate(validators::email("Invalid email address.")),
            FieldMeta::password("password")
                .caption("Password")
                .required()
                .min_length(8),
            FieldMeta::password("confirm_password")
                .caption("Confirm password")
                .required()
                .min_length(8),
        ]
    }

    fn password_confirmation() -> Option<PasswordConfirmation> {
        Some(PasswordConfirmation::default())
    }
}

impl From<RegistrationForm> for SignUpEmail {
    fn from(form: RegistrationForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            password: form.password,
        }
    }
}
