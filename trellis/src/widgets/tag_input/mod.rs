//! Tag input widget - picks several items from a suggestion list.

mod events;
mod state;

pub use state::{TagInput, TagInputId};
