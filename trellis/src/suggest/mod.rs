//! Suggestion list navigation shared by the suggesting inputs.
//!
//! [`SuggestionList`] is the state machine; [`Autocomplete`](crate::widgets::Autocomplete)
//! and [`TagInput`](crate::widgets::TagInput) both drive one.

mod events;
mod filter;
mod item;
mod state;

pub use events::ListAction;
pub use filter::{FilterMatch, fuzzy_filter, substring_filter};
pub use item::SuggestionItem;
pub use state::{ListPhase, SuggestionList};
