pub mod context;
pub mod error;
pub mod events;
pub mod input;
pub mod suggest;
pub mod validation;
pub mod widgets;

pub use context::WidgetContext;
pub use error::{Error, Result};

pub mod prelude {
    pub use crate::context::WidgetContext;
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventResult, WidgetEvent, WidgetEventKind};
    pub use crate::input::{Key, KeyCombo, Modifiers};
    pub use crate::suggest::{SuggestionItem, SuggestionList, fuzzy_filter};
    pub use crate::validation::config::{FieldConfig, PasswordPolicy};
    pub use crate::validation::rules;
    pub use crate::validation::{
        EnglishMessages, ErrorDisplay, FieldError, FieldHandle, FieldId, Form, MessageCatalog,
        MessageKey, Rule, Translate, Validatable, ValidatedField, ValidationResult, Validator,
    };
    pub use crate::widgets::{Autocomplete, TagInput};
}
