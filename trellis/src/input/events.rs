/// Modifier keys state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Control key held
    pub ctrl: bool,
    /// Shift key held
    pub shift: bool,
    /// Alt key held
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    /// Check if a modifier that turns a key into a shortcut is active.
    ///
    /// Shift alone still produces text, so it does not count.
    pub fn is_shortcut(&self) -> bool {
        self.ctrl || self.alt
    }
}
