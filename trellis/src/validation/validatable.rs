//! Validatable trait for widgets that support validation.

use super::{ErrorDisplay, ValidationResult};

/// Trait for widgets that can be validated.
///
/// This is what a [`Form`](super::Form) needs from each field: the ability to
/// validate on demand (storing and showing the result) and to reset back to
/// the unevaluated state.
pub trait Validatable: Send + Sync {
    /// Evaluate the current value, store the result and return it.
    fn validate(&self) -> ValidationResult;

    /// Clear the stored result without touching the value.
    fn reset(&self);

    /// Check if the widget currently shows a validation error.
    fn has_error(&self) -> bool;

    /// Get the current validation error message (if any).
    fn error(&self) -> Option<String>;

    /// Get the widget ID for focusing.
    fn widget_id(&self) -> String;

    /// Get the error display mode.
    fn error_display(&self) -> ErrorDisplay;

    /// Set the error display mode.
    fn set_error_display(&self, display: ErrorDisplay);
}
