//! Autocomplete widget - text input with fuzzy-filtered suggestions.

mod events;
mod state;

pub use state::{Autocomplete, AutocompleteId};
