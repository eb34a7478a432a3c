//! Validation configuration types.

use serde::Deserialize;

use super::ErrorDisplay;

/// Requirements checked by the [`password`](super::rules::password) rule.
///
/// Deserializes from e.g. `{"min_length": 12, "require_special": false}`;
/// omitted keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum length in characters.
    pub min_length: usize,
    /// Require at least one lowercase letter.
    pub require_lowercase: bool,
    /// Require at least one uppercase letter.
    pub require_uppercase: bool,
    /// Require at least one decimal digit.
    pub require_digit: bool,
    /// Require at least one character that is neither alphanumeric nor whitespace.
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// Create the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum length.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    /// Toggle the lowercase requirement.
    pub fn require_lowercase(mut self, on: bool) -> Self {
        self.require_lowercase = on;
        self
    }

    /// Toggle the uppercase requirement.
    pub fn require_uppercase(mut self, on: bool) -> Self {
        self.require_uppercase = on;
        self
    }

    /// Toggle the digit requirement.
    pub fn require_digit(mut self, on: bool) -> Self {
        self.require_digit = on;
        self
    }

    /// Toggle the special character requirement.
    pub fn require_special(mut self, on: bool) -> Self {
        self.require_special = on;
        self
    }
}

/// Per-field configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// If false, a `required` rule runs before the field's own rules.
    pub optional: bool,
    /// Where the field shows its error.
    pub error_display: ErrorDisplay,
}

impl FieldConfig {
    /// Create a config for a required field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Set the error display mode.
    pub fn error_display(mut self, display: ErrorDisplay) -> Self {
        self.error_display = display;
        self
    }
}
