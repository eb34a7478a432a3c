//! Event handling for the Autocomplete widget.

use crate::context::WidgetContext;
use crate::events::{EventResult, WidgetEvent, WidgetEventKind};
use crate::input::{Key, KeyCombo};
use crate::suggest::ListAction;

use super::Autocomplete;

impl Autocomplete {
    /// Handle a key event while the autocomplete has focus.
    pub fn on_key(&self, key: &KeyCombo, cx: &WidgetContext) -> EventResult {
        // Ignore keys with ctrl/alt modifiers
        if key.modifiers.is_shortcut() {
            return EventResult::Ignored;
        }

        match self.suggestions().handle_key(key, self.filtered_count()) {
            ListAction::Select(index) => {
                self.select_at(index, cx);
                return EventResult::Consumed;
            }
            ListAction::Moved(_) => {
                cx.push_event(WidgetEvent::new(WidgetEventKind::CursorMove, self.id_string()));
                return EventResult::Consumed;
            }
            ListAction::Ignored => {}
        }

        let had_error = self.field().has_error();
        let changed = match key.key {
            Key::Backspace => self.delete_char_before(),
            Key::Delete => self.delete_char_at(),
            Key::Left => {
                self.text_cursor_left();
                false
            }
            Key::Right => {
                self.text_cursor_right();
                false
            }
            Key::Home => {
                self.text_cursor_home();
                false
            }
            Key::End => {
                self.text_cursor_end();
                false
            }
            other => match other.typed_char() {
                Some(c) => self.insert_char(c),
                None => return EventResult::Ignored,
            },
        };

        if changed {
            cx.set_input_text(self.value());
            cx.push_event(WidgetEvent::new(WidgetEventKind::Change, self.id_string()));
            if self.field().has_error() != had_error {
                cx.push_event(WidgetEvent::new(WidgetEventKind::Validate, self.id_string()));
            }
        }
        EventResult::Consumed
    }

    /// The input gained focus.
    pub fn on_focus(&self) {
        self.suggestions().focus();
    }

    /// The input lost focus.
    pub fn on_blur(&self) {
        self.suggestions().blur();
    }

    /// Mouse-down on a suggestion; keeps the list open through the blur.
    pub fn on_item_mouse_down(&self) {
        self.suggestions().item_mouse_down();
    }

    /// Pointer over the suggestion at `index`.
    pub fn on_item_hover(&self, index: usize) -> EventResult {
        if self.suggestions().hover(index, self.filtered_count()) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Click on the suggestion at `index`.
    pub fn on_item_click(&self, index: usize, cx: &WidgetContext) -> EventResult {
        if self.select_at(index, cx) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Select a filtered item: emit the event, then show its label.
    fn select_at(&self, index: usize, cx: &WidgetContext) -> bool {
        let items = self.filtered_items();
        if self
            .suggestions()
            .select(index, &items, &self.id_string(), cx)
            .is_none()
        {
            return false;
        }
        self.apply_selection(index);
        cx.set_input_text(self.value());
        true
    }
}
