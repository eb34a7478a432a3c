use trellis::events::{EventResult, WidgetEventKind};
use trellis::input::{Key, KeyCombo};
use trellis::validation::{MessageKey, Validatable, Validator};
use trellis::widgets::Autocomplete;
use trellis::WidgetContext;

fn countries() -> Autocomplete {
    let autocomplete = Autocomplete::with_placeholder("Search countries...");
    autocomplete.set_items(&[
        ("us", "United States"),
        ("uk", "United Kingdom"),
        ("fr", "France"),
    ]);
    autocomplete
}

fn press(autocomplete: &Autocomplete, key: Key, cx: &WidgetContext) -> EventResult {
    autocomplete.on_key(&KeyCombo::key(key), cx)
}

#[test]
fn test_typing_filters() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();
    assert_eq!(autocomplete.filtered_count(), 3);

    press(&autocomplete, Key::Char('f'), &cx);
    assert_eq!(autocomplete.value(), "f");
    assert_eq!(cx.input_text().as_deref(), Some("f"));
    assert_eq!(autocomplete.filtered_items()[0].0, "fr");

    let events = cx.drain_events();
    assert_eq!(events[0].kind, WidgetEventKind::Change);
    assert_eq!(events[0].widget_id, autocomplete.id_string());
}

#[test]
fn test_select_with_keyboard() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();

    press(&autocomplete, Key::Char('u'), &cx);
    press(&autocomplete, Key::Down, &cx);
    let (expected_id, expected_label) = autocomplete.filtered_items()[0].clone();
    cx.drain_events();

    assert!(press(&autocomplete, Key::Enter, &cx).is_handled());
    assert_eq!(autocomplete.selected_id(), Some(expected_id.clone()));
    assert_eq!(autocomplete.value(), expected_label);
    assert_eq!(autocomplete.highlighted(), None);

    let events = cx.drain_events();
    assert_eq!(events[0].kind, WidgetEventKind::Select);
    assert_eq!(events[0].item_id, Some(expected_id));
    assert_eq!(cx.take_focus_request(), Some(autocomplete.id_string()));
}

#[test]
fn test_editing_clears_selected_id() {
    let autocomplete = countries();
    autocomplete.apply_selection(0);
    assert!(autocomplete.selected_id().is_some());

    autocomplete.delete_char_before();
    assert_eq!(autocomplete.selected_id(), None);
}

#[test]
fn test_enter_without_highlight_is_ignored() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();
    assert_eq!(press(&autocomplete, Key::Enter, &cx), EventResult::Ignored);
    assert!(cx.drain_events().is_empty());
}

#[test]
fn test_shortcut_keys_ignored() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();
    let result = autocomplete.on_key(&KeyCombo::key(Key::Char('s')).ctrl(), &cx);
    assert_eq!(result, EventResult::Ignored);
    assert!(autocomplete.is_empty());
}

#[test]
fn test_filter_shrink_drops_highlight() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();
    press(&autocomplete, Key::Down, &cx);
    press(&autocomplete, Key::Down, &cx);
    press(&autocomplete, Key::Down, &cx);
    assert_eq!(autocomplete.highlighted(), Some(2));

    press(&autocomplete, Key::Char('q'), &cx);
    assert_eq!(autocomplete.highlighted(), None);
}

#[test]
fn test_cursor_editing() {
    let autocomplete = Autocomplete::new();
    let cx = WidgetContext::new();
    for c in "héllo".chars() {
        press(&autocomplete, Key::Char(c), &cx);
    }
    press(&autocomplete, Key::Home, &cx);
    press(&autocomplete, Key::Right, &cx);
    press(&autocomplete, Key::Delete, &cx);
    assert_eq!(autocomplete.value(), "hllo");

    press(&autocomplete, Key::End, &cx);
    press(&autocomplete, Key::Backspace, &cx);
    press(&autocomplete, Key::Space, &cx);
    assert_eq!(autocomplete.value(), "hll ");
}

#[test]
fn test_mouse_click_survives_blur() {
    let autocomplete = countries();
    let cx = WidgetContext::new();
    autocomplete.on_focus();

    autocomplete.on_item_mouse_down();
    autocomplete.on_blur();
    assert!(autocomplete.is_open());

    assert!(autocomplete.on_item_hover(2).is_handled());
    assert_eq!(autocomplete.highlighted(), Some(2));
    assert!(autocomplete.on_item_click(2, &cx).is_handled());
    assert_eq!(autocomplete.selected_id().as_deref(), Some("fr"));
}

#[test]
fn test_validates_as_form_field() {
    let autocomplete = Autocomplete::with_validator(Validator::english().required());
    let cx = WidgetContext::new();
    autocomplete.on_focus();

    assert_eq!(autocomplete.validate().key(), Some(MessageKey::Required));
    assert!(autocomplete.has_error());

    press(&autocomplete, Key::Char('x'), &cx);
    assert!(!autocomplete.has_error());
    let kinds: Vec<WidgetEventKind> = cx.drain_events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![WidgetEventKind::Change, WidgetEventKind::Validate]);
}

#[test]
fn test_dirty_tracking() {
    let autocomplete = countries();
    autocomplete.clear_dirty();
    assert!(!autocomplete.is_dirty());
    autocomplete.insert_char('a');
    assert!(autocomplete.is_dirty());
}

#[test]
fn test_rule_can_read_selection() {
    use std::sync::{Arc, OnceLock};

    let slot: Arc<OnceLock<Autocomplete>> = Arc::new(OnceLock::new());
    let reader = Arc::clone(&slot);
    let instrument = Autocomplete::with_validator(Validator::english().custom(
        MessageKey::Custom("validation.pick_from_list"),
        move |_| reader.get().is_some_and(|a| a.selected_id().is_some()),
    ));
    instrument.set_items(&[("xy", "Xylophone"), ("dr", "Drum")]);
    slot.set(instrument.clone()).unwrap();
    let cx = WidgetContext::new();
    instrument.on_focus();

    press(&instrument, Key::Char('x'), &cx);
    assert!(instrument.validate().is_invalid());

    press(&instrument, Key::Char('y'), &cx);
    assert!(instrument.has_error());

    // The id is stored before the field re-validates
    assert_eq!(instrument.apply_selection(0).as_deref(), Some("xy"));
    assert_eq!(instrument.value(), "Xylophone");
    assert!(!instrument.has_error());
}
