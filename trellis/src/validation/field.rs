//! A single input's validation state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::config::FieldConfig;
use super::{ErrorDisplay, Validatable, ValidationResult, Validator};

/// Unique identifier for a ValidatedField instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValidatedFieldId(usize);

impl ValidatedFieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ValidatedFieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__field_{}", self.0)
    }
}

/// Internal state for a ValidatedField
#[derive(Debug, Default)]
struct FieldInner {
    /// Current value
    value: String,
    /// Last stored result; `None` until first evaluated
    result: Option<ValidationResult>,
    /// Set once the field has shown an error; edits re-validate from then on
    shown_error: bool,
    /// How to display validation errors
    error_display: ErrorDisplay,
}

/// A value coupled to a validator.
///
/// Edits are not validated while the user is still filling the field in for
/// the first time. Once [`validate`](Self::validate) has produced an error,
/// every later [`set_value`](Self::set_value) re-validates so the error
/// clears as soon as the value becomes valid.
///
/// Clones share the same state, so a clone can be handed to a
/// [`Form`](super::Form) while the host keeps editing the original.
///
/// # Example
///
/// ```ignore
/// let email = ValidatedField::with_config(
///     Validator::english().email(),
///     &FieldConfig::new(),
/// );
///
/// email.set_value("not-an");          // no result yet
/// assert!(email.validate().is_invalid());
/// email.set_value("not-an@email.com"); // re-validated right away
/// assert!(!email.has_error());
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedField {
    /// Unique identifier for this field instance
    id: ValidatedFieldId,
    /// Rules for this field
    validator: Arc<Validator>,
    /// Internal state
    inner: Arc<RwLock<FieldInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl ValidatedField {
    /// Create a field that runs exactly the validator's rules.
    pub fn new(validator: Validator) -> Self {
        Self {
            id: ValidatedFieldId::new(),
            validator: Arc::new(validator),
            inner: Arc::new(RwLock::new(FieldInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a field from a validator and field config.
    ///
    /// Non-optional fields get `required` prepended to their rules.
    pub fn with_config(validator: Validator, config: &FieldConfig) -> Self {
        let field = Self::new(validator.for_field(config.optional));
        field.set_error_display(config.error_display);
        field
    }

    /// Set the initial value without validating.
    pub fn with_value(self, value: impl Into<String>) -> Self {
        self.write().value = value.into();
        self
    }

    /// Get the unique ID for this field.
    pub fn id(&self) -> ValidatedFieldId {
        self.id
    }

    /// Get the ID as a string (for focusing).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// Get the validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    // A rule that panicked must not leave the field looking valid, so
    // poisoned guards are recovered instead of skipped.
    fn read(&self) -> RwLockReadGuard<'_, FieldInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FieldInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the rules with no lock held; rules may read this field back.
    fn evaluate(&self, value: &str) -> ValidationResult {
        self.validator.validate(value)
    }

    // -------------------------------------------------------------------------
    // Value
    // -------------------------------------------------------------------------

    /// Get the current value.
    pub fn value(&self) -> String {
        self.read().value.clone()
    }

    /// Set the value.
    ///
    /// Returns the new result if the field re-validated, which it does only
    /// after having shown an error.
    pub fn set_value(&self, value: impl Into<String>) -> Option<ValidationResult> {
        let value = value.into();
        let eager = {
            let mut guard = self.write();
            guard.value = value.clone();
            guard.shown_error
        };
        self.dirty.store(true, Ordering::SeqCst);

        if !eager {
            return None;
        }
        let result = self.evaluate(&value);
        log::trace!(
            "{} re-validated on change: valid={}",
            self.id,
            result.is_valid()
        );
        let mut guard = self.write();
        // A rule may have edited the field; that edit's result wins
        if guard.value == value {
            guard.result = Some(result.clone());
        }
        Some(result)
    }

    /// Clear the value. Same re-validation rules as [`set_value`](Self::set_value).
    pub fn clear(&self) -> Option<ValidationResult> {
        self.set_value(String::new())
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate the current value, store the result and return it.
    pub fn validate(&self) -> ValidationResult {
        let value = self.value();
        let result = self.evaluate(&value);
        {
            let mut guard = self.write();
            if result.is_invalid() {
                guard.shown_error = true;
            }
            guard.result = Some(result.clone());
        }
        self.dirty.store(true, Ordering::SeqCst);
        log::debug!("{} validated: valid={}", self.id, result.is_valid());
        result
    }

    /// Forget the stored result and return to the pristine state.
    ///
    /// The value is kept. Edits stop re-validating until the next error.
    pub fn reset(&self) {
        let mut guard = self.write();
        guard.result = None;
        guard.shown_error = false;
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// The stored result; `None` if unevaluated or reset.
    pub fn result(&self) -> Option<ValidationResult> {
        self.read().result.clone()
    }

    /// Check if the field has been evaluated since creation or last reset.
    pub fn is_evaluated(&self) -> bool {
        self.read().result.is_some()
    }

    /// Check if the stored result is valid. Unevaluated fields are not.
    pub fn is_valid(&self) -> bool {
        matches!(self.read().result, Some(ValidationResult::Valid))
    }

    /// Check if the field currently shows an error.
    pub fn has_error(&self) -> bool {
        self.read()
            .result
            .as_ref()
            .is_some_and(ValidationResult::is_invalid)
    }

    /// Get the current error message.
    pub fn error(&self) -> Option<String> {
        self.read()
            .result
            .as_ref()
            .and_then(|r| r.message().map(str::to_string))
    }

    /// Get the error display mode.
    pub fn error_display(&self) -> ErrorDisplay {
        self.read().error_display
    }

    /// Set the error display mode.
    pub fn set_error_display(&self, display: ErrorDisplay) {
        self.write().error_display = display;
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the field state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Default for ValidatedField {
    fn default() -> Self {
        Self::new(Validator::default())
    }
}

impl Validatable for ValidatedField {
    fn validate(&self) -> ValidationResult {
        ValidatedField::validate(self)
    }

    fn reset(&self) {
        ValidatedField::reset(self)
    }

    fn has_error(&self) -> bool {
        ValidatedField::has_error(self)
    }

    fn error(&self) -> Option<String> {
        ValidatedField::error(self)
    }

    fn widget_id(&self) -> String {
        self.id_string()
    }

    fn error_display(&self) -> ErrorDisplay {
        ValidatedField::error_display(self)
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        ValidatedField::set_error_display(self, display)
    }
}
