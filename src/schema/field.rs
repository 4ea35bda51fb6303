use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::form::FormValue;

/// Declared kind of a field. Drives both input checks and the structural
/// type reported in API documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Boolean,
    Date,
}

impl FieldKind {
    /// Kinds whose values are entered as free text; `min_length` only applies to these.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Email | FieldKind::Password)
    }
}

type ValidatorFn = dyn Fn(Option<FormValue>) -> BoxFuture<'static, Result<(), String>> + Send + Sync;

/// Custom per-field check. Resolves to `Err(message)` when the value is rejected.
#[derive(Clone)]
pub struct Validator(Arc<ValidatorFn>);

impl Validator {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Option<FormValue>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        Self(Arc::new(move |value| Box::pin(f(value))))
    }

    /// Wrap a synchronous check.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(Option<&FormValue>) -> Result<(), String> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(move |value| {
            let f = Arc::clone(&f);
            async move { f(value.as_ref()) }
        })
    }

    pub async fn run(&self, value: Option<FormValue>) -> Result<(), String> {
        (self.0)(value).await
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Descriptor for one field of a schema description.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    pub key: &'static str,
    pub caption: Option<&'static str>,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    /// Accepts a repeated key; the value may then arrive as a sequence.
    pub multiple: bool,
    pub validator: Option<Validator>,
}

impl FieldMeta {
    pub fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            caption: None,
            kind,
            required: false,
            min_length: None,
            multiple: false,
            validator: None,
        }
    }

    pub fn text(key: &'static str) -> Self {
        Self::new(key, FieldKind::Text)
    }

    pub fn email(key: &'static str) -> Self {
        Self::new(key, FieldKind::Email)
    }

    pub fn password(key: &'static str) -> Self {
        Self::new(key, FieldKind::Password)
    }

    pub fn number(key: &'static str) -> Self {
        Self::new(key, FieldKind::Number)
    }

    pub fn boolean(key: &'static str) -> Self {
        Self::new(key, FieldKind::Boolean)
    }

    pub fn date(key: &'static str) -> Self {
        Self::new(key, FieldKind::Date)
    }

    pub fn caption(mut self, caption: &'static str) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Name used in user-facing messages: the caption, or the key when none is set.
    pub fn label(&self) -> &'static str {
        self.caption.unwrap_or(self.key)
    }
}
