//! Built-in input widgets.
//!
//! Widgets are state handles: cheap to clone, with interior mutability so
//! every method takes `&self`. The host forwards key, focus and pointer
//! events to them and drains the resulting [`WidgetEvent`](crate::events::WidgetEvent)s
//! from its [`WidgetContext`](crate::WidgetContext).

pub mod autocomplete;
pub mod tag_input;

pub use autocomplete::Autocomplete;
pub use tag_input::TagInput;
