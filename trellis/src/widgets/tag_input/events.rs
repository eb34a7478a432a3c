//! Event handling for the TagInput widget.

use crate::context::WidgetContext;
use crate::events::{EventResult, WidgetEvent, WidgetEventKind};
use crate::input::{Key, KeyCombo};
use crate::suggest::ListAction;

use super::TagInput;

impl TagInput {
    /// Handle a key event while the tag input has focus.
    ///
    /// Backspace on an empty query removes the last tag.
    pub fn on_key(&self, key: &KeyCombo, cx: &WidgetContext) -> EventResult {
        if key.modifiers.is_shortcut() {
            return EventResult::Ignored;
        }

        match self.suggestions().handle_key(key, self.filtered_count()) {
            ListAction::Select(index) => {
                let had_error = self.field().has_error();
                self.select_at(index, cx);
                self.report_validation(had_error, cx);
                return EventResult::Consumed;
            }
            ListAction::Moved(_) => {
                cx.push_event(WidgetEvent::new(WidgetEventKind::CursorMove, self.id_string()));
                return EventResult::Consumed;
            }
            ListAction::Ignored => {}
        }

        match key.key {
            Key::Backspace => {
                if self.pop_query_char() {
                    cx.set_input_text(self.query());
                } else {
                    let had_error = self.field().has_error();
                    if self.remove_last_tag().is_none() {
                        return EventResult::Ignored;
                    }
                    cx.push_event(WidgetEvent::new(WidgetEventKind::Change, self.id_string()));
                    self.report_validation(had_error, cx);
                }
            }
            other => match other.typed_char() {
                Some(c) => {
                    self.push_query_char(c);
                    cx.set_input_text(self.query());
                }
                None => return EventResult::Ignored,
            },
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
        let had_error = self.field().has_error();
        if self.select_at(index, cx) {
            self.report_validation(had_error, cx);
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }

    /// Push `Validate` if a tag change flipped the shown error.
    fn report_validation(&self, had_error: bool, cx: &WidgetContext) {
        if self.field().has_error() != had_error {
            cx.push_event(WidgetEvent::new(WidgetEventKind::Validate, self.id_string()));
        }
    }

    /// Select a suggestion: emit the event, then add it as a tag.
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
        cx.set_input_text(String::new());
        cx.push_event(WidgetEvent::new(WidgetEventKind::Change, self.id_string()));
        true
    }
}
