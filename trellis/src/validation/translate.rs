//! Message translation for validation failures.
//!
//! Rules never produce text themselves. They report a [`MessageKey`] plus
//! named parameters, and the [`Validator`](super::Validator) turns that into
//! a message through whatever [`Translate`] implementation it was given.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// A named message parameter, e.g. `("min", "3")`.
pub type Param = (&'static str, String);

/// Identifies the rule that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Required,
    MinLength,
    MaxLength,
    ExactLength,
    Pattern,
    Email,
    Url,
    Numeric,
    Integer,
    MinValue,
    MaxValue,
    PasswordTooShort,
    PasswordNoLowercase,
    PasswordNoUppercase,
    PasswordNoDigits,
    PasswordNoSpecial,
    Matches,
    OneOf,
    /// Host-defined rule; the string is its catalog key.
    Custom(&'static str),
}

impl MessageKey {
    /// Catalog key, e.g. `validation.min_length`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "validation.required",
            Self::MinLength => "validation.min_length",
            Self::MaxLength => "validation.max_length",
            Self::ExactLength => "validation.exact_length",
            Self::Pattern => "validation.pattern",
            Self::Email => "validation.email",
            Self::Url => "validation.url",
            Self::Numeric => "validation.numeric",
            Self::Integer => "validation.integer",
            Self::MinValue => "validation.min_value",
            Self::MaxValue => "validation.max_value",
            Self::PasswordTooShort => "validation.password.too_short",
            Self::PasswordNoLowercase => "validation.password.no_lowercase",
            Self::PasswordNoUppercase => "validation.password.no_uppercase",
            Self::PasswordNoDigits => "validation.password.no_digits",
            Self::PasswordNoSpecial => "validation.password.no_special",
            Self::Matches => "validation.matches",
            Self::OneOf => "validation.one_of",
            Self::Custom(key) => key,
        }
    }
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produces user-facing text for a failed rule.
///
/// Passed explicitly to each [`Validator`](super::Validator); there is no
/// process-wide provider. Closures work too:
///
/// ```ignore
/// let validator = Validator::new(|key: MessageKey, _: &[Param]| key.to_string());
/// ```
pub trait Translate: Send + Sync {
    /// Render the message for `key` with the given parameters.
    fn translate(&self, key: MessageKey, params: &[Param]) -> String;
}

impl<F> Translate for F
where
    F: Fn(MessageKey, &[Param]) -> String + Send + Sync,
{
    fn translate(&self, key: MessageKey, params: &[Param]) -> String {
        self(key, params)
    }
}

/// Replace `{name}` placeholders in `template` with parameter values.
///
/// Unknown placeholders are left as written.
pub fn interpolate(template: &str, params: &[Param]) -> String {
    let mut out = template.to_string();
    for (name, value) in params {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl EnglishMessages {
    /// The English template for `key`.
    pub fn template(key: MessageKey) -> &'static str {
        match key {
            MessageKey::Required => "This field is required",
            MessageKey::MinLength => "Must be at least {min} characters",
            MessageKey::MaxLength => "Must be at most {max} characters",
            MessageKey::ExactLength => "Must be exactly {len} characters",
            MessageKey::Pattern => "Invalid format",
            MessageKey::Email => "Please enter a valid email address",
            MessageKey::Url => "Please enter a valid URL",
            MessageKey::Numeric => "Must be a number",
            MessageKey::Integer => "Must be a whole number",
            MessageKey::MinValue => "Must be at least {min}",
            MessageKey::MaxValue => "Must be at most {max}",
            MessageKey::PasswordTooShort => "Password must be at least {min} characters",
            MessageKey::PasswordNoLowercase => "Password must contain a lowercase letter",
            MessageKey::PasswordNoUppercase => "Password must contain an uppercase letter",
            MessageKey::PasswordNoDigits => "Password must contain a digit",
            MessageKey::PasswordNoSpecial => "Password must contain a special character",
            MessageKey::Matches => "Values do not match",
            MessageKey::OneOf => "Please choose one of the allowed values",
            MessageKey::Custom(_) => "Invalid value",
        }
    }
}

impl Translate for EnglishMessages {
    fn translate(&self, key: MessageKey, params: &[Param]) -> String {
        interpolate(Self::template(key), params)
    }
}

/// Message templates keyed by catalog key, with English fallback.
///
/// Catalogs load from a flat JSON object:
///
/// ```json
/// {
///   "validation.required": "Champ obligatoire",
///   "validation.min_length": "Au moins {min} caractères"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog (everything falls back to English).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        log::debug!("Loaded message catalog with {} entries", catalog.len());
        Ok(catalog)
    }

    /// Set the template for a key.
    pub fn insert(&mut self, key: MessageKey, template: impl Into<String>) {
        self.templates.insert(key.as_str().to_string(), template.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    /// The template stored for a key, without fallback.
    pub fn get(&self, key: MessageKey) -> Option<&str> {
        self.templates.get(key.as_str()).map(String::as_str)
    }

    /// Number of templates in the catalog.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the catalog has no templates.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Translate for MessageCatalog {
    fn translate(&self, key: MessageKey, params: &[Param]) -> String {
        let template = self
            .get(key)
            .unwrap_or_else(|| EnglishMessages::template(key));
        interpolate(template, params)
    }
}
