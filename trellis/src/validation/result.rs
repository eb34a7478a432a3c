use super::translate::MessageKey;

/// Outcome of validating one value or a whole form.
///
/// A message is present exactly when the result is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value passed every rule.
    #[default]
    Valid,
    /// A rule rejected the value.
    Invalid {
        /// Which rule failed.
        key: MessageKey,
        /// Translated, user-facing message.
        message: String,
    },
}

impl ValidationResult {
    /// Build an invalid result.
    pub fn invalid(key: MessageKey, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }

    /// Check if the value passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if the value failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// The failure message, if invalid.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid { message, .. } => Some(message),
        }
    }

    /// The key of the failing rule, if invalid.
    pub fn key(&self) -> Option<MessageKey> {
        match self {
            Self::Valid => None,
            Self::Invalid { key, .. } => Some(*key),
        }
    }
}

/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name (from `Form::add_field`).
    pub field_name: String,
    /// Widget ID (for focusing).
    pub widget_id: String,
    /// Which rule failed.
    pub key: MessageKey,
    /// Error message.
    pub message: String,
}
