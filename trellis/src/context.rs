use std::sync::{Arc, RwLock};

use crate::events::WidgetEvent;

#[derive(Debug, Default)]
struct WidgetContextInner {
    /// Pending widget events to dispatch
    pending_events: Vec<WidgetEvent>,
    /// Widget that asked to (re)gain input focus
    focus_request: Option<String>,
    /// Text of the input that handled the current event
    input_text: Option<String>,
}

/// Context passed to widget event handlers.
///
/// `WidgetContext` stands in for the host framework: widgets push events and
/// focus requests into it, and the host drains them after each interaction.
/// It uses interior mutability, so all methods take `&self`, and cloning it
/// shares the same queue.
///
/// # Example
///
/// ```ignore
/// let cx = WidgetContext::new();
/// country.on_key(&KeyCombo::key(Key::Enter), &cx);
///
/// for event in cx.drain_events() {
///     if event.kind == WidgetEventKind::Select {
///         println!("picked {:?}", event.item_id);
///     }
/// }
/// if let Some(id) = cx.take_focus_request() {
///     focus_manager.focus(&id);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WidgetContext {
    inner: Arc<RwLock<WidgetContextInner>>,
}

impl WidgetContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a widget event to the queue.
    pub fn push_event(&self, event: WidgetEvent) {
        if let Ok(mut inner) = self.inner.write() {
            inner.pending_events.push(event);
        }
    }

    /// Drain all pending widget events, oldest first.
    pub fn drain_events(&self) -> Vec<WidgetEvent> {
        self.inner
            .write()
            .map(|mut inner| std::mem::take(&mut inner.pending_events))
            .unwrap_or_default()
    }

    /// Ask the host to move input focus to the given widget.
    ///
    /// A later request replaces an earlier one that has not been taken yet.
    pub fn request_focus(&self, widget_id: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.focus_request = Some(widget_id.into());
        }
    }

    /// Take the pending focus request, if any.
    pub fn take_focus_request(&self) -> Option<String> {
        self.inner
            .write()
            .ok()
            .and_then(|mut inner| inner.focus_request.take())
    }

    /// Record the text of the input handling the current event.
    pub fn set_input_text(&self, text: String) {
        if let Ok(mut inner) = self.inner.write() {
            inner.input_text = Some(text);
        }
    }

    /// Get the text recorded by the last input event.
    pub fn input_text(&self) -> Option<String> {
        self.inner
            .read()
            .ok()
            .and_then(|inner| inner.input_text.clone())
    }
}
