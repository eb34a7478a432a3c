//! Input module - key codes, modifiers and terminal event conversion.

pub mod convert;
pub mod events;
pub mod keybinds;

pub use convert::convert_key_event;
pub use events::Modifiers;
pub use keybinds::{Key, KeyCombo};
