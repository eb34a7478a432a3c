//! Widget event types.
//!
//! Widgets push events to the [`WidgetContext`](crate::WidgetContext) queue
//! while handling input. The host drains the queue after each user
//! interaction and dispatches its own handlers.

// =============================================================================
// Widget Event Types
// =============================================================================

/// Identifies which handler to call for a widget event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEventKind {
    /// Suggestion selected (Enter on a highlighted item, or click)
    Select,
    /// Highlighted suggestion moved
    CursorMove,
    /// Value changed (input text, tag added or removed)
    Change,
    /// Validation state changed (error shown or cleared)
    Validate,
}

/// A widget event to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetEvent {
    /// Which kind of event
    pub kind: WidgetEventKind,
    /// Widget ID that triggered the event
    pub widget_id: String,
    /// Item the event refers to (selected suggestion id)
    pub item_id: Option<String>,
}

impl WidgetEvent {
    /// Create a new widget event.
    pub fn new(kind: WidgetEventKind, widget_id: impl Into<String>) -> Self {
        Self {
            kind,
            widget_id: widget_id.into(),
            item_id: None,
        }
    }

    /// Create a select event for the given item.
    pub fn select(widget_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            kind: WidgetEventKind::Select,
            widget_id: widget_id.into(),
            item_id: Some(item_id.into()),
        }
    }
}

// =============================================================================
// Event Result
// =============================================================================

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
