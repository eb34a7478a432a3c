//! Autocomplete widget state.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::suggest::{FilterMatch, SuggestionItem, SuggestionList, fuzzy_filter};
use crate::validation::{ErrorDisplay, Validatable, ValidatedField, ValidationResult, Validator};

/// Unique identifier for an Autocomplete widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutocompleteId(usize);

impl AutocompleteId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for AutocompleteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__autocomplete_{}", self.0)
    }
}

/// Internal state for an Autocomplete widget.
#[derive(Debug, Default)]
struct AutocompleteInner {
    /// Cursor position in text (byte offset)
    text_cursor: usize,
    /// Placeholder text
    placeholder: String,
    /// All available options as (id, label)
    options: Vec<(String, String)>,
    /// Filtered option indices with scores, best first
    filtered: Vec<FilterMatch>,
    /// Id of the option whose label is in the text, if the user picked one
    selected_id: Option<String>,
}

/// A text input with fuzzy-filtered suggestions.
///
/// The text lives in a [`ValidatedField`], so the widget validates like any
/// other field and can be added to a [`Form`](crate::validation::Form).
/// Highlight and focus are handled by the embedded [`SuggestionList`].
///
/// # Example
///
/// ```ignore
/// let country = Autocomplete::with_placeholder("Search countries...");
/// country.set_items(&[("us", "United States"), ("uk", "United Kingdom")]);
///
/// country.on_focus();
/// country.on_key(&KeyCombo::key(Key::Char('u')), &cx);
/// country.on_key(&KeyCombo::key(Key::Down), &cx);
/// country.on_key(&KeyCombo::key(Key::Enter), &cx);
/// assert_eq!(country.selected_id().as_deref(), Some("us"));
/// ```
#[derive(Debug, Clone)]
pub struct Autocomplete {
    /// Unique identifier for this autocomplete instance
    id: AutocompleteId,
    /// Text value and validation state
    field: ValidatedField,
    /// Highlight and focus state of the suggestion list
    list: SuggestionList,
    /// Internal state
    inner: Arc<RwLock<AutocompleteInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl Autocomplete {
    /// Create a new empty autocomplete without validation rules.
    pub fn new() -> Self {
        Self::with_field(ValidatedField::default())
    }

    /// Create an autocomplete validated by `validator`.
    pub fn with_validator(validator: Validator) -> Self {
        Self::with_field(ValidatedField::new(validator))
    }

    /// Create an autocomplete around an existing field.
    pub fn with_field(field: ValidatedField) -> Self {
        let text_cursor = field.value().len();
        Self {
            id: AutocompleteId::new(),
            field,
            list: SuggestionList::new(),
            inner: Arc::new(RwLock::new(AutocompleteInner {
                text_cursor,
                ..Default::default()
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create an autocomplete with a placeholder.
    pub fn with_placeholder(placeholder: impl Into<String>) -> Self {
        let autocomplete = Self::new();
        autocomplete.set_placeholder(placeholder);
        autocomplete
    }

    /// Get the unique ID for this autocomplete.
    pub fn id(&self) -> AutocompleteId {
        self.id
    }

    /// Get the ID as a string (for events and focusing).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    /// The field holding the text and its validation state.
    pub fn field(&self) -> &ValidatedField {
        &self.field
    }

    /// The suggestion list controller.
    pub fn suggestions(&self) -> &SuggestionList {
        &self.list
    }

    // -------------------------------------------------------------------------
    // Text value
    // -------------------------------------------------------------------------

    /// Get the current text value.
    pub fn value(&self) -> String {
        self.field.value()
    }

    /// Set the text value. Clears any picked option.
    pub fn set_value(&self, value: impl Into<String>) {
        self.replace_text(value.into(), None);
    }

    /// Replace the text and picked option, then hand the text to the field.
    ///
    /// The field re-validates after `inner` is released, so rules can read
    /// this widget.
    fn replace_text(&self, value: String, selected_id: Option<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.text_cursor = value.len();
            guard.selected_id = selected_id;
            self.refilter_locked(&mut guard, &value);
        }
        self.field.set_value(value);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Clear the text value.
    pub fn clear(&self) {
        self.set_value(String::new());
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// Get the placeholder text.
    pub fn placeholder(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.placeholder.clone())
            .unwrap_or_default()
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.placeholder = placeholder.into();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the text cursor position (byte offset).
    pub fn text_cursor(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.text_cursor)
            .unwrap_or(0)
    }

    /// Id of the option picked from the list, if the text still shows it.
    pub fn selected_id(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.selected_id.clone())
    }

    // -------------------------------------------------------------------------
    // Text manipulation (called on key events)
    // -------------------------------------------------------------------------

    /// Apply an edit to the text and cursor. Returns true if the text changed.
    fn edit(&self, f: impl FnOnce(&mut String, &mut usize)) -> bool {
        let old = self.field.value();
        let mut value = old.clone();
        let (changed, moved) = {
            let Ok(mut guard) = self.inner.write() else {
                return false;
            };
            // The field may have been edited directly
            if !value.is_char_boundary(guard.text_cursor) {
                guard.text_cursor = value.len();
            }
            let old_cursor = guard.text_cursor;
            f(&mut value, &mut guard.text_cursor);

            let changed = value != old;
            if changed {
                guard.selected_id = None;
                self.refilter_locked(&mut guard, &value);
            }
            (changed, guard.text_cursor != old_cursor)
        };

        if changed {
            self.field.set_value(value);
        }
        if changed || moved {
            self.dirty.store(true, Ordering::SeqCst);
        }
        changed
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&self, c: char) -> bool {
        self.edit(|value, cursor| {
            value.insert(*cursor, c);
            *cursor += c.len_utf8();
        })
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char_before(&self) -> bool {
        self.edit(|value, cursor| {
            if let Some((prev, _)) = value[..*cursor].char_indices().last() {
                value.remove(prev);
                *cursor = prev;
            }
        })
    }

    /// Delete the character at the cursor (delete key).
    pub fn delete_char_at(&self) -> bool {
        self.edit(|value, cursor| {
            if *cursor < value.len() {
                value.remove(*cursor);
            }
        })
    }

    /// Move text cursor left.
    pub fn text_cursor_left(&self) {
        self.edit(|value, cursor| {
            *cursor = value[..*cursor]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        });
    }

    /// Move text cursor right.
    pub fn text_cursor_right(&self) {
        self.edit(|value, cursor| {
            *cursor = value[*cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| *cursor + i)
                .unwrap_or(value.len());
        });
    }

    /// Move text cursor to start.
    pub fn text_cursor_home(&self) {
        self.edit(|_, cursor| *cursor = 0);
    }

    /// Move text cursor to end.
    pub fn text_cursor_end(&self) {
        self.edit(|value, cursor| *cursor = value.len());
    }

    // -------------------------------------------------------------------------
    // Items management
    // -------------------------------------------------------------------------

    /// Set the available items.
    pub fn set_items<I: SuggestionItem>(&self, items: &[I]) {
        let query = self.field.value();
        if let Ok(mut guard) = self.inner.write() {
            guard.options = items
                .iter()
                .map(|i| (i.suggestion_id(), i.suggestion_label()))
                .collect();
            self.refilter_locked(&mut guard, &query);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Get the number of filtered items.
    pub fn filtered_count(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.filtered.len())
            .unwrap_or(0)
    }

    /// Get the filtered items as (id, label), best match first.
    pub fn filtered_items(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .filtered
                    .iter()
                    .filter_map(|m| guard.options.get(m.index).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the label at a filtered index.
    pub fn filtered_label(&self, filtered_index: usize) -> Option<String> {
        self.inner.read().ok().and_then(|guard| {
            guard
                .filtered
                .get(filtered_index)
                .and_then(|m| guard.options.get(m.index))
                .map(|(_, label)| label.clone())
        })
    }

    /// Re-run the fuzzy filter for `query`.
    fn refilter_locked(&self, guard: &mut AutocompleteInner, query: &str) {
        let labels: Vec<String> = guard.options.iter().map(|(_, l)| l.clone()).collect();
        guard.filtered = fuzzy_filter(query, &labels);
        self.list.items_changed(guard.filtered.len());
    }

    /// Put the option at a filtered index into the text.
    ///
    /// Returns the option id, or `None` if the index is out of bounds.
    pub fn apply_selection(&self, filtered_index: usize) -> Option<String> {
        let (id, label) = self.filtered_items().get(filtered_index).cloned()?;
        // The id is stored before the field re-validates the label
        self.replace_text(label, Some(id.clone()));
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

    /// Check if the autocomplete state has changed.
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

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Validatable implementation
// -----------------------------------------------------------------------------

impl Validatable for Autocomplete {
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
