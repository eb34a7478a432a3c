//! Form-level aggregation of validated fields.

use std::sync::{Arc, RwLock, Weak};

use log::debug;

use super::result::{FieldError, ValidationResult};
use super::validatable::Validatable;

/// Identifier a [`Form`] assigns to each registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Internal representation of a registered field.
struct FieldEntry {
    id: FieldId,
    name: String,
    widget_id: String,
    validate: Box<dyn Fn() -> ValidationResult + Send + Sync>,
    reset: Box<dyn Fn() + Send + Sync>,
}

#[derive(Default)]
struct FormInner {
    /// Registered fields, in registration order
    fields: Vec<Arc<FieldEntry>>,
    next_id: u64,
}

impl FormInner {
    fn remove(&mut self, id: FieldId) -> bool {
        let before = self.fields.len();
        self.fields.retain(|entry| entry.id != id);
        self.fields.len() != before
    }

    fn get(&self, id: FieldId) -> Option<Arc<FieldEntry>> {
        self.fields.iter().find(|entry| entry.id == id).cloned()
    }
}

/// Aggregates fields for batch validation.
///
/// Fields register with [`add_field`](Self::add_field) when they appear and
/// deregister when their [`FieldHandle`] is dropped, so conditional fields
/// come and go freely between validations.
///
/// [`validate`](Self::validate) validates *every* field, so each one shows
/// its own state, and returns the first failure in registration order.
///
/// # Example
///
/// ```ignore
/// let form = Form::new();
/// let _name = form.add_field(&name_field, "name");
/// let _email = form.add_field(&email_field, "email");
///
/// match form.validate() {
///     ValidationResult::Valid => submit(),
///     ValidationResult::Invalid { message, .. } => toast(message),
/// }
/// ```
#[derive(Clone, Default)]
pub struct Form {
    inner: Arc<RwLock<FormInner>>,
}

impl Form {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field.
    ///
    /// The field stays registered while the returned handle is alive.
    pub fn add_field<W: Validatable + Clone + 'static>(
        &self,
        widget: &W,
        name: impl Into<String>,
    ) -> FieldHandle {
        let widget_for_validate = widget.clone();
        let widget_for_reset = widget.clone();
        let widget_id = widget.widget_id();
        let name = name.into();

        let Ok(mut inner) = self.inner.write() else {
            return FieldHandle::detached(FieldId(u64::MAX));
        };
        let id = FieldId(inner.next_id);
        inner.next_id += 1;

        debug!("Form::add_field id={} name={} widget={}", id, name, widget_id);
        inner.fields.push(Arc::new(FieldEntry {
            id,
            name,
            widget_id,
            validate: Box::new(move || widget_for_validate.validate()),
            reset: Box::new(move || widget_for_reset.reset()),
        }));

        FieldHandle {
            id,
            form: Arc::downgrade(&self.inner),
            registered: true,
        }
    }

    /// Deregister a field. Returns false if it was not registered.
    pub fn remove_field(&self, id: FieldId) -> bool {
        let removed = self
            .inner
            .write()
            .map(|mut inner| inner.remove(id))
            .unwrap_or(false);
        if removed {
            debug!("Form::remove_field id={}", id);
        }
        removed
    }

    /// Check if a field is registered.
    pub fn contains(&self, id: FieldId) -> bool {
        self.inner
            .read()
            .map(|inner| inner.get(id).is_some())
            .unwrap_or(false)
    }

    /// Number of registered fields.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.fields.len()).unwrap_or(0)
    }

    /// Check if no fields are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the registered fields, in registration order.
    pub fn field_names(&self) -> Vec<String> {
        self.snapshot().iter().map(|entry| entry.name.clone()).collect()
    }

    /// Copy the entry list so field callbacks run without the form lock held.
    fn snapshot(&self) -> Vec<Arc<FieldEntry>> {
        self.inner
            .read()
            .map(|inner| inner.fields.clone())
            .unwrap_or_default()
    }

    /// Validate every field and return the first failure.
    ///
    /// Fields are validated in registration order and none is skipped.
    pub fn validate(&self) -> ValidationResult {
        let entries = self.snapshot();
        let mut first_failure = None;

        for entry in &entries {
            let result = (entry.validate)();
            if first_failure.is_none() && result.is_invalid() {
                first_failure = Some(result);
            }
        }

        debug!(
            "Form::validate fields={} valid={}",
            entries.len(),
            first_failure.is_none()
        );
        first_failure.unwrap_or_default()
    }

    /// Validate every field and return all failures in registration order.
    pub fn validate_all(&self) -> Vec<FieldError> {
        self.snapshot()
            .iter()
            .filter_map(|entry| match (entry.validate)() {
                ValidationResult::Valid => None,
                ValidationResult::Invalid { key, message } => Some(FieldError {
                    field_name: entry.name.clone(),
                    widget_id: entry.widget_id.clone(),
                    key,
                    message,
                }),
            })
            .collect()
    }

    /// Widget ID of the first invalid field (for focusing).
    ///
    /// Validates every field, like [`validate`](Self::validate).
    pub fn first_invalid_widget(&self) -> Option<String> {
        self.validate_all()
            .into_iter()
            .next()
            .map(|error| error.widget_id)
    }

    /// Reset every field.
    pub fn reset(&self) {
        for entry in self.snapshot() {
            (entry.reset)();
        }
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("fields", &self.field_names())
            .finish()
    }
}

/// A field's registration in a [`Form`].
///
/// Dropping the handle removes the field, which mirrors an input being
/// unmounted. Calls through a handle whose field is gone, or whose form has
/// been dropped, do nothing.
#[derive(Debug)]
pub struct FieldHandle {
    id: FieldId,
    form: Weak<RwLock<FormInner>>,
    registered: bool,
}

impl FieldHandle {
    fn detached(id: FieldId) -> Self {
        Self {
            id,
            form: Weak::new(),
            registered: false,
        }
    }

    /// The id the form assigned to this field.
    pub fn id(&self) -> FieldId {
        self.id
    }

    fn entry(&self) -> Option<Arc<FieldEntry>> {
        let form = self.form.upgrade()?;
        let inner = form.read().ok()?;
        inner.get(self.id)
    }

    /// Check if the field is still registered.
    pub fn is_registered(&self) -> bool {
        self.entry().is_some()
    }

    /// Validate just this field.
    ///
    /// Returns `None` if the field is no longer registered.
    pub fn validate(&self) -> Option<ValidationResult> {
        match self.entry() {
            Some(entry) => Some((entry.validate)()),
            None => {
                debug!("FieldHandle::validate on removed field {}", self.id);
                None
            }
        }
    }

    /// Reset just this field. No-op if it is no longer registered.
    pub fn reset(&self) {
        if let Some(entry) = self.entry() {
            (entry.reset)();
        }
    }

    /// Deregister the field now.
    pub fn remove(self) {
        drop(self);
    }

    /// Keep the field registered after the handle is dropped.
    ///
    /// The field then stays until [`Form::remove_field`] is called with the
    /// returned id.
    pub fn leak(mut self) -> FieldId {
        self.registered = false;
        self.id
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        if !self.registered {
            return;
        }
        if let Some(form) = self.form.upgrade()
            && let Ok(mut inner) = form.write()
            && inner.remove(self.id)
        {
            debug!("FieldHandle dropped, removed {}", self.id);
        }
    }
}
