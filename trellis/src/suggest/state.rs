//! Suggestion list navigation state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::trace;

/// Observable state of a [`SuggestionList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    /// The host input does not have focus.
    Unfocused,
    /// Focused, nothing highlighted.
    Focused,
    /// Focused with the item at this index highlighted.
    Highlighted(usize),
}

/// Internal state for a SuggestionList
#[derive(Debug, Default)]
struct SuggestionListInner {
    /// Whether the host input has focus
    focused: bool,
    /// Highlighted index into the current filtered items
    highlighted: Option<usize>,
    /// A list item got mouse-down; the next blur belongs to that click
    pending_click: bool,
    /// Item count seen by the last `items_changed`
    item_count: usize,
}

/// Keyboard/mouse navigation over a filtered suggestion list.
///
/// The controller never owns the items. Hosts pass the current filtered
/// count (or the items themselves, see `on_key`) and the controller keeps
/// only the highlighted index and focus state.
///
/// Navigation wraps through "nothing highlighted": Down from the last item
/// and Up from the first clear the highlight instead of jumping to the other
/// end. When the list shrinks past the highlighted index the highlight is
/// dropped rather than moved onto a different item.
///
/// # Example
///
/// ```ignore
/// let list = SuggestionList::new();
/// list.focus();
/// list.highlight_next(3); // Some(0)
/// list.highlight_next(3); // Some(1)
/// list.items_changed(1);  // highlight dropped, item 1 is gone
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    /// Internal state
    inner: Arc<RwLock<SuggestionListInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
}

impl SuggestionList {
    /// Create an unfocused list.
    pub fn new() -> Self {
        Self::default()
    }

    fn update<R>(&self, f: impl FnOnce(&mut SuggestionListInner) -> R) -> Option<R> {
        let mut guard = self.inner.write().ok()?;
        let result = f(&mut guard);
        self.dirty.store(true, Ordering::SeqCst);
        Some(result)
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Current phase.
    pub fn phase(&self) -> ListPhase {
        self.inner
            .read()
            .map(|guard| match (guard.focused, guard.highlighted) {
                (false, _) => ListPhase::Unfocused,
                (true, None) => ListPhase::Focused,
                (true, Some(index)) => ListPhase::Highlighted(index),
            })
            .unwrap_or(ListPhase::Unfocused)
    }

    /// Check if the host input has focus.
    pub fn is_focused(&self) -> bool {
        self.inner.read().map(|guard| guard.focused).unwrap_or(false)
    }

    /// The highlighted index, if any.
    pub fn highlighted(&self) -> Option<usize> {
        self.inner.read().ok().and_then(|guard| guard.highlighted)
    }

    /// Check if a list-item click is in progress.
    pub fn has_pending_click(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.pending_click)
            .unwrap_or(false)
    }

    /// Item count reported by the last list change.
    pub fn item_count(&self) -> usize {
        self.inner.read().map(|guard| guard.item_count).unwrap_or(0)
    }

    /// Whether the host should show the list for `len` filtered items.
    pub fn is_open(&self, len: usize) -> bool {
        len > 0 && self.is_focused()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// The host input gained focus.
    pub fn focus(&self) {
        self.update(|s| {
            s.focused = true;
            s.highlighted = None;
        });
        trace!("SuggestionList focused");
    }

    /// The host input lost focus.
    ///
    /// If a list item was just pressed, this blur is the click stealing
    /// focus: the pending flag is consumed and the list stays as it is.
    /// Returns true if the list actually closed.
    pub fn blur(&self) -> bool {
        let closed = self
            .update(|s| {
                if s.pending_click {
                    s.pending_click = false;
                    false
                } else {
                    s.focused = false;
                    s.highlighted = None;
                    true
                }
            })
            .unwrap_or(false);
        trace!("SuggestionList blur closed={}", closed);
        closed
    }

    /// Mouse-down on a list item; suppresses the next blur.
    pub fn item_mouse_down(&self) {
        self.update(|s| s.pending_click = true);
    }

    pub(crate) fn clear_pending_click(&self) {
        self.update(|s| s.pending_click = false);
    }

    // -------------------------------------------------------------------------
    // Highlight
    // -------------------------------------------------------------------------

    /// The filtered item list changed to `len` items.
    ///
    /// A highlight past the new end is dropped.
    pub fn items_changed(&self, len: usize) {
        self.update(|s| {
            s.item_count = len;
            if s.highlighted.is_some_and(|index| index >= len) {
                trace!("SuggestionList highlight dropped, list shrank to {}", len);
                s.highlighted = None;
            }
        });
    }

    /// Move the highlight down. Returns the new highlight.
    pub fn highlight_next(&self, len: usize) -> Option<usize> {
        self.items_changed(len);
        self.update(|s| {
            s.highlighted = match s.highlighted {
                _ if len == 0 => None,
                None => Some(0),
                Some(index) if index + 1 < len => Some(index + 1),
                Some(_) => None,
            };
            s.highlighted
        })
        .flatten()
    }

    /// Move the highlight up. Returns the new highlight.
    pub fn highlight_previous(&self, len: usize) -> Option<usize> {
        self.items_changed(len);
        self.update(|s| {
            s.highlighted = match s.highlighted {
                _ if len == 0 => None,
                None => Some(len - 1),
                Some(0) => None,
                Some(index) => Some(index - 1),
            };
            s.highlighted
        })
        .flatten()
    }

    /// Highlight the item under the pointer, if it is in bounds.
    pub fn hover(&self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.update(|s| {
            s.item_count = len;
            s.highlighted = Some(index);
        });
        true
    }

    /// Clear the highlight. Returns true if something was highlighted.
    pub fn clear_highlight(&self) -> bool {
        self.update(|s| s.highlighted.take().is_some())
            .unwrap_or(false)
    }

    /// The highlighted index if it is within `len` items.
    pub fn selectable(&self, len: usize) -> Option<usize> {
        self.highlighted().filter(|&index| index < len)
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the list state has changed.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
