use once_cell::sync::Lazy;
use regex::Regex;

use super::Validator;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Rejects single values that are not shaped like an email address.
/// Absent and empty values pass; pair with `required()` to demand one.
pub fn email(message: &'static str) -> Validator {
    Validator::sync(move |value| match value.and_then(|v| v.as_str()) {
        Some(s) if !s.is_empty() && !is_email(s) => Err(message.to_string()),
        _ => Ok(()),
    })
}

/// Rejects single values longer than `max` characters.
pub fn max_length(max: usize, message: &'static str) -> Validator {
    Validator::sync(move |value| match value.and_then(|v| v.as_str()) {
        Some(s) if s.chars().count() > max => Err(message.to_string()),
        _ => Ok(()),
    })
}

/// Rejects single values that do not read as a finite, non-negative number.
/// Absent and empty values pass.
pub fn non_negative(message: &'static str) -> Validator {
    Validator::sync(move |value| match value.and_then(|v| v.as_str()).map(str::trim) {
        Some(s) if !s.is_empty() => match s.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(()),
            _ => Err(message.to_string()),
        },
        _ => Ok(()),
    })
}
