use trellis::events::{EventResult, WidgetEventKind};
use trellis::input::{Key, KeyCombo};
use trellis::suggest::{ListAction, ListPhase, SuggestionList};
use trellis::WidgetContext;

fn focused() -> SuggestionList {
    let list = SuggestionList::new();
    list.focus();
    list
}

#[test]
fn test_starts_unfocused() {
    let list = SuggestionList::new();
    assert_eq!(list.phase(), ListPhase::Unfocused);
    assert!(!list.is_open(3));
}

#[test]
fn test_focus_opens_without_highlight() {
    let list = focused();
    assert_eq!(list.phase(), ListPhase::Focused);
    assert!(list.is_open(3));
    assert!(!list.is_open(0));
}

#[test]
fn test_down_walks_then_clears() {
    let list = focused();
    assert_eq!(list.highlight_next(3), Some(0));
    assert_eq!(list.highlight_next(3), Some(1));
    assert_eq!(list.highlight_next(3), Some(2));
    assert_eq!(list.highlight_next(3), None);
    assert_eq!(list.phase(), ListPhase::Focused);
}

#[test]
fn test_up_starts_from_last() {
    let list = focused();
    assert_eq!(list.highlight_previous(3), Some(2));
    assert_eq!(list.highlight_previous(3), Some(1));
    assert_eq!(list.highlight_previous(3), Some(0));
    assert_eq!(list.highlight_previous(3), None);
}

#[test]
fn test_navigation_on_empty_list() {
    let list = focused();
    assert_eq!(list.highlight_next(0), None);
    assert_eq!(list.highlight_previous(0), None);
}

#[test]
fn test_shrinking_list_drops_highlight() {
    let list = focused();
    list.highlight_next(5);
    list.highlight_next(5);
    assert_eq!(list.highlighted(), Some(1));

    list.items_changed(4);
    assert_eq!(list.highlighted(), Some(1));

    list.items_changed(1);
    assert_eq!(list.highlighted(), None);
    assert_eq!(list.item_count(), 1);
}

#[test]
fn test_keys_ignored_when_unfocused() {
    let list = SuggestionList::new();
    assert_eq!(list.handle_key(&KeyCombo::key(Key::Down), 3), ListAction::Ignored);
    assert_eq!(list.highlighted(), None);
}

#[test]
fn test_shortcuts_ignored() {
    let list = focused();
    let key = KeyCombo::key(Key::Down).ctrl();
    assert_eq!(list.handle_key(&key, 3), ListAction::Ignored);
}

#[test]
fn test_enter_without_highlight_is_ignored() {
    let list = focused();
    let cx = WidgetContext::new();
    let items = ["a", "b"];
    let result = list.on_key(&KeyCombo::key(Key::Enter), &items, "input", &cx);
    assert_eq!(result, EventResult::Ignored);
    assert!(cx.drain_events().is_empty());
}

#[test]
fn test_enter_selects_highlighted() {
    let list = focused();
    let cx = WidgetContext::new();
    let items = [("us", "United States"), ("uk", "United Kingdom")];

    list.on_key(&KeyCombo::key(Key::Down), &items, "country", &cx);
    list.on_key(&KeyCombo::key(Key::Down), &items, "country", &cx);
    let result = list.on_key(&KeyCombo::key(Key::Enter), &items, "country", &cx);
    assert!(result.is_handled());

    let events = cx.drain_events();
    let kinds: Vec<WidgetEventKind> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WidgetEventKind::CursorMove,
            WidgetEventKind::CursorMove,
            WidgetEventKind::Select
        ]
    );
    assert_eq!(events[2].item_id.as_deref(), Some("uk"));
    assert_eq!(cx.take_focus_request().as_deref(), Some("country"));
    assert_eq!(list.highlighted(), None);
}

#[test]
fn test_escape_clears_highlight() {
    let list = focused();
    list.highlight_next(2);
    assert_eq!(
        list.handle_key(&KeyCombo::key(Key::Escape), 2),
        ListAction::Moved(None)
    );
    assert_eq!(list.handle_key(&KeyCombo::key(Key::Escape), 2), ListAction::Ignored);
}

#[test]
fn test_blur_closes() {
    let list = focused();
    list.highlight_next(2);
    assert!(list.blur());
    assert_eq!(list.phase(), ListPhase::Unfocused);
    assert_eq!(list.highlighted(), None);
}

#[test]
fn test_item_mouse_down_suppresses_blur() {
    let list = focused();
    let cx = WidgetContext::new();
    let items = ["a", "b"];

    list.item_mouse_down();
    assert!(!list.blur());
    assert!(list.is_focused());
    assert!(!list.has_pending_click());

    list.item_mouse_down();
    let result = list.click_item(1, &items, "input", &cx);
    assert!(result.is_handled());
    assert!(!list.has_pending_click());
    assert_eq!(cx.drain_events()[0].item_id.as_deref(), Some("b"));
}

#[test]
fn test_click_out_of_bounds() {
    let list = focused();
    let cx = WidgetContext::new();
    let items = ["a"];
    assert_eq!(list.click_item(3, &items, "input", &cx), EventResult::Ignored);
    assert!(cx.take_focus_request().is_none());
}

#[test]
fn test_hover_highlights() {
    let list = focused();
    assert!(list.hover(1, 2));
    assert_eq!(list.phase(), ListPhase::Highlighted(1));
    assert!(!list.hover(2, 2));
    assert_eq!(list.highlighted(), Some(1));
}
