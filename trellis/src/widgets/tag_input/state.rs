//! Tag input widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::suggest::{SuggestionItem, SuggestionList, fuzzy_filter};
use crate::validation::{ErrorDisplay, Validatable, ValidatedField, ValidationResult, Validator};

/// Separator between tag ids in the validated value.
pub(crate) const TAG_SEPARATOR: &str = ",";

/// Unique identifier for a TagInput widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagInputId(usize);

impl TagInputId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TagInputId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__tag_input_{}", self.0)
    }
}

/// Internal state for a TagInput widget.
#[derive(Debug, Default)]
struct TagInputInner {
    /// Text typed to search for the next tag
    query: String,
    /// All available options as (id, label)
    options: Vec<(String, String)>,
    /// Selected tag ids, in the order they were added
    tags: Vec<String>,
    /// Indices into `options` for unselected options matching the query
    filtered: Vec<usize>,
}

/// A multi-select input: type to search, pick suggestions as tags.
///
/// Already selected options never appear as suggestions. The validated value
/// is the comma-joined list of tag ids, so `required` means "at least one
/// tag".
///
/// # Example
///
/// ```ignore
/// let languages = TagInput::new();
/// languages.set_items(&[("en", "English"), ("fr", "French"), ("de", "German")]);
/// languages.add_tag("fr");
/// assert_eq!(languages.filtered_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TagInput {
    /// Unique identifier for this tag input instance
    id: TagInputId,
    /// Joined tag ids and validation state
    field: ValidatedField,
    /// Highlight and focus state of the suggestion list
    list: SuggestionList,
    /// Internal state
    inner: Arc<RwLock<TagInputInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl TagInput {
    /// Create an empty tag input without validation rules.
    pub fn new() -> Self {
        Self::with_field(ValidatedField::default())
    }

    /// Create a tag input validated by `validator`.
    pub fn with_validator(validator: Validator) -> Self {
        Self::with_field(ValidatedField::new(validator))
    }

    /// Create a tag input around an existing field.
    ///
    /// The field's value is replaced by the (empty) tag list.
    pub fn with_field(field: ValidatedField) -> Self {
        field.set_value(String::new());
        Self {
            id: TagInputId::new(),
            field,
            list: SuggestionList::new(),
            inner: Arc::new(RwLock::new(TagInputInner::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the unique ID for this tag input.
    pub fn id(&self) -> TagInputId {
        self.id
    }

    /// Get the ID as a string (for events and focusing).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// The field holding the joined tag ids and validation state.
    pub fn field(&self) -> &ValidatedField {
        &self.field
    }

    /// The suggestion list controller.
    pub fn suggestions(&self) -> &SuggestionList {
        &self.list
    }

    // -------------------------------------------------------------------------
    // Query
    // -------------------------------------------------------------------------

    /// Get the search text.
    pub fn query(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.query.clone())
            .unwrap_or_default()
    }

    /// Set the search text.
    pub fn set_query(&self, query: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.query = query.into();
            self.refilter_locked(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Append a character to the search text.
    pub fn push_query_char(&self, c: char) {
        if let Ok(mut guard) = self.inner.write() {
            guard.query.push(c);
            self.refilter_locked(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove the last character of the search text. Returns false if empty.
    pub fn pop_query_char(&self) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if guard.query.pop().is_none() {
            return false;
        }
        self.refilter_locked(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    // -------------------------------------------------------------------------
    // Tags
    // -------------------------------------------------------------------------

    /// Selected tag ids, in insertion order.
    pub fn tags(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| guard.tags.clone())
            .unwrap_or_default()
    }

    /// Labels of the selected tags; ids without a known option show as-is.
    pub fn tag_labels(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .tags
                    .iter()
                    .map(|tag| {
                        guard
                            .options
                            .iter()
                            .find(|(id, _)| id == tag)
                            .map(|(_, label)| label.clone())
                            .unwrap_or_else(|| tag.clone())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Add a tag. Returns false if it was already selected.
    pub fn add_tag(&self, id: impl Into<String>) -> bool {
        let id = id.into();
        self.update_tags(|tags| {
            if tags.contains(&id) {
                return None;
            }
            tags.push(id);
            Some(())
        })
        .is_some()
    }

    /// Remove a tag. Returns false if it was not selected.
    pub fn remove_tag(&self, id: &str) -> bool {
        self.update_tags(|tags| {
            let index = tags.iter().position(|tag| tag == id)?;
            tags.remove(index);
            Some(())
        })
        .is_some()
    }

    /// Remove the most recently added tag.
    pub fn remove_last_tag(&self) -> Option<String> {
        self.update_tags(Vec::pop)
    }

    /// Edit the tag list, then push the joined ids into the field.
    ///
    /// `f` returns `None` to leave the list untouched. The field
    /// re-validates after `inner` is released, so rules can read the tags.
    fn update_tags<R>(&self, f: impl FnOnce(&mut Vec<String>) -> Option<R>) -> Option<R> {
        let (outcome, joined) = {
            let mut guard = self.inner.write().ok()?;
            let outcome = f(&mut guard.tags)?;
            self.refilter_locked(&mut guard);
            (outcome, guard.tags.join(TAG_SEPARATOR))
        };
        self.field.set_value(joined);
        self.dirty.store(true, Ordering::SeqCst);
        Some(outcome)
    }

    // -------------------------------------------------------------------------
    // Items management
    // -------------------------------------------------------------------------

    /// Set the available items.
    pub fn set_items<I: SuggestionItem>(&self, items: &[I]) {
        if let Ok(mut guard) = self.inner.write() {
            guard.options = items
                .iter()
                .map(|i| (i.suggestion_id(), i.suggestion_label()))
                .collect();
            self.refilter_locked(&mut guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the number of suggestions.
    pub fn filtered_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.filtered.len())
            .unwrap_or(0)
    }

    /// Get the suggestions as (id, label), best match first.
    pub fn filtered_items(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .filtered
                    .iter()
                    .filter_map(|&index| guard.options.get(index).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Re-filter the unselected options with the current query.
    fn refilter_locked(&self, guard: &mut TagInputInner) {
        let candidates: Vec<usize> = guard
            .options
            .iter()
            .enumerate()
            .filter(|(_, (id, _))| !guard.tags.contains(id))
            .map(|(index, _)| index)
            .collect();
        let labels: Vec<String> = candidates
            .iter()
            .map(|&index| guard.options[index].1.clone())
            .collect();
        guard.filtered = fuzzy_filter(&guard.query, &labels)
            .into_iter()
            .map(|m| candidates[m.index])
            .collect();
        self.list.items_changed(guard.filtered.len());
    }

    /// Add the suggestion at a filtered index as a tag and clear the query.
    ///
    /// Returns the tag id, or `None` if the index is out of bounds.
    pub fn apply_selection(&self, filtered_index: usize) -> Option<String> {
        let (id, _) = self.filtered_items().get(filtered_index).cloned()?;
        if let Ok(mut guard) = self.inner.write() {
            guard.query.clear();
        }
        self.add_tag(id.clone());
        Some(id)
    }

    // -------------------------------------------------------------------------
    // Suggestion list state
    // -------------------------------------------------------------------------

    /// Check if the suggestion list should be shown.
    pub fn is_open(&self) -> bool {
        self.list.is_open(self.filtered_count())
    }

    /// The highlighted filtered index, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.list.highlighted()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the tag input state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst) || self.field.is_dirty() || self.list.is_dirty()
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.field.clear_dirty();
        self.list.clear_dirty();
    }
}

impl Default for TagInput {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for TagInput {
    fn validate(&self) -> ValidationResult {
        self.field.validate()
    }

    fn reset(&self) {
        self.field.reset()
    }

    fn has_error(&self) -> bool {
        self.field.has_error()
    }

    fn error(&self) -> Option<String> {
        self.field.error()
    }

    fn widget_id(&self) -> String {
        self.id_string()
    }

    fn error_display(&self) -> ErrorDisplay {
        self.field.error_display()
    }

    fn set_error_display(&self, display: ErrorDisplay) {
        self.field.set_error_display(display)
    }
}
