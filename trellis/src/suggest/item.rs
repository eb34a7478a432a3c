//! SuggestionItem trait for items shown in a suggestion list.

/// Trait for items that can be displayed in a suggestion list.
///
/// # Example
///
/// ```ignore
/// struct Country {
///     code: String,
///     name: String,
/// }
///
/// impl SuggestionItem for Country {
///     fn suggestion_id(&self) -> String {
///         self.code.clone()
///     }
///
///     fn suggestion_label(&self) -> String {
///         self.name.clone()
///     }
/// }
/// ```
pub trait SuggestionItem {
    /// Unique identifier for this item; emitted on selection.
    fn suggestion_id(&self) -> String;

    /// Display text for this item; used for filtering.
    fn suggestion_label(&self) -> String;
}

impl SuggestionItem for String {
    fn suggestion_id(&self) -> String {
        self.clone()
    }

    fn suggestion_label(&self) -> String {
        self.clone()
    }
}

impl SuggestionItem for &str {
    fn suggestion_id(&self) -> String {
        (*self).to_string()
    }

    fn suggestion_label(&self) -> String {
        (*self).to_string()
    }
}

// (id, label) tuples
impl<S1, S2> SuggestionItem for (S1, S2)
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    fn suggestion_id(&self) -> String {
        self.0.as_ref().to_string()
    }

    fn suggestion_label(&self) -> String {
        self.1.as_ref().to_string()
    }
}
