//! Event handling for the suggestion list.

use log::debug;

use crate::context::WidgetContext;
use crate::events::{EventResult, WidgetEvent, WidgetEventKind};
use crate::input::{Key, KeyCombo};

use super::{SuggestionItem, SuggestionList};

/// What a key did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// The key is not a list key; let the host input handle it.
    Ignored,
    /// The highlight moved (possibly to nothing).
    Moved(Option<usize>),
    /// Enter on a highlighted item; the host should select this index.
    Select(usize),
}

impl SuggestionList {
    /// Apply a navigation key for a list of `len` items.
    ///
    /// Only Up, Down, Enter and Escape are list keys, and only while focused.
    /// Enter without a highlight is not a list key, so hosts can treat it
    /// as form submission.
    pub fn handle_key(&self, key: &KeyCombo, len: usize) -> ListAction {
        if key.modifiers.is_shortcut() || !self.is_focused() {
            return ListAction::Ignored;
        }

        match key.key {
            Key::Down => ListAction::Moved(self.highlight_next(len)),
            Key::Up => ListAction::Moved(self.highlight_previous(len)),
            Key::Enter => match self.selectable(len) {
                Some(index) => ListAction::Select(index),
                None => ListAction::Ignored,
            },
            Key::Escape if self.clear_highlight() => ListAction::Moved(None),
            _ => ListAction::Ignored,
        }
    }

    /// Handle a key for the host input `widget_id` showing `items`.
    ///
    /// Pushes `CursorMove` on navigation and `Select` with the item id on
    /// Enter, and asks for focus to return to the host input.
    pub fn on_key<I: SuggestionItem>(
        &self,
        key: &KeyCombo,
        items: &[I],
        widget_id: &str,
        cx: &WidgetContext,
    ) -> EventResult {
        match self.handle_key(key, items.len()) {
            ListAction::Ignored => EventResult::Ignored,
            ListAction::Moved(_) => {
                cx.push_event(WidgetEvent::new(WidgetEventKind::CursorMove, widget_id));
                EventResult::Consumed
            }
            ListAction::Select(index) => {
                self.select(index, items, widget_id, cx);
                EventResult::Consumed
            }
        }
    }

    /// Handle a click on the item at `index`.
    pub fn click_item<I: SuggestionItem>(
        &self,
        index: usize,
        items: &[I],
        widget_id: &str,
        cx: &WidgetContext,
    ) -> EventResult {
        if self.select(index, items, widget_id, cx).is_some() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Emit selection of `items[index]` and request focus for the host.
    ///
    /// Returns the selected id, or `None` if `index` is out of bounds.
    pub fn select<I: SuggestionItem>(
        &self,
        index: usize,
        items: &[I],
        widget_id: &str,
        cx: &WidgetContext,
    ) -> Option<String> {
        let id = items.get(index)?.suggestion_id();
        debug!("SuggestionList select widget={} index={} id={}", widget_id, index, id);
        self.finish_selection();
        cx.push_event(WidgetEvent::select(widget_id, id.clone()));
        cx.request_focus(widget_id);
        Some(id)
    }

    /// Settle state after a selection: no highlight, no pending click.
    pub(crate) fn finish_selection(&self) {
        self.clear_highlight();
        self.clear_pending_click();
    }
}
