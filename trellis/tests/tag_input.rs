use trellis::events::{EventResult, WidgetEventKind};
use trellis::input::{Key, KeyCombo};
use trellis::validation::{Form, MessageKey, Validatable, Validator};
use trellis::widgets::TagInput;
use trellis::WidgetContext;

fn languages() -> TagInput {
    let tags = TagInput::new();
    tags.set_items(&[("en", "English"), ("fr", "French"), ("de", "German")]);
    tags
}

fn press(tags: &TagInput, key: Key, cx: &WidgetContext) -> EventResult {
    tags.on_key(&KeyCombo::key(key), cx)
}

#[test]
fn test_selected_tags_leave_suggestions() {
    let tags = languages();
    assert!(tags.add_tag("fr"));
    assert!(!tags.add_tag("fr"));
    assert_eq!(tags.filtered_count(), 2);
    assert!(tags.filtered_items().iter().all(|(id, _)| id != "fr"));

    assert!(tags.remove_tag("fr"));
    assert_eq!(tags.filtered_count(), 3);
}

#[test]
fn test_field_value_joins_tags() {
    let tags = languages();
    tags.add_tag("en");
    tags.add_tag("de");
    assert_eq!(tags.field().value(), "en,de");
    assert_eq!(tags.tag_labels(), vec!["English", "German"]);
}

#[test]
fn test_select_with_keyboard_clears_query() {
    let tags = languages();
    let cx = WidgetContext::new();
    tags.on_focus();

    press(&tags, Key::Char('g'), &cx);
    press(&tags, Key::Char('e'), &cx);
    assert_eq!(tags.query(), "ge");
    press(&tags, Key::Down, &cx);
    let expected = tags.filtered_items()[0].0.clone();
    cx.drain_events();

    assert!(press(&tags, Key::Enter, &cx).is_handled());
    assert_eq!(tags.tags(), vec![expected.clone()]);
    assert_eq!(tags.query(), "");

    let events = cx.drain_events();
    assert_eq!(events[0].kind, WidgetEventKind::Select);
    assert_eq!(events[0].item_id, Some(expected));
    assert_eq!(events[1].kind, WidgetEventKind::Change);
}

#[test]
fn test_backspace_edits_query_then_tags() {
    let tags = languages();
    let cx = WidgetContext::new();
    tags.add_tag("en");
    tags.add_tag("fr");
    tags.set_query("d");

    press(&tags, Key::Backspace, &cx);
    assert_eq!(tags.query(), "");
    assert_eq!(tags.tags().len(), 2);

    press(&tags, Key::Backspace, &cx);
    assert_eq!(tags.tags(), vec!["en".to_string()]);
    assert_eq!(cx.drain_events()[0].kind, WidgetEventKind::Change);

    press(&tags, Key::Backspace, &cx);
    assert_eq!(press(&tags, Key::Backspace, &cx), EventResult::Ignored);
}

#[test]
fn test_required_tags_in_form() {
    let tags = TagInput::with_validator(Validator::english().required());
    tags.set_items(&["rust", "go"]);
    let cx = WidgetContext::new();
    tags.on_focus();

    let form = Form::new();
    let _handle = form.add_field(&tags, "tags");
    assert_eq!(form.validate().key(), Some(MessageKey::Required));
    assert!(tags.has_error());

    assert!(tags.on_item_click(0, &cx).is_handled());
    assert!(!tags.has_error());
    let kinds: Vec<WidgetEventKind> = cx.drain_events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WidgetEventKind::Select,
            WidgetEventKind::Change,
            WidgetEventKind::Validate
        ]
    );
    assert!(form.validate().is_valid());
}

#[test]
fn test_hover_and_out_of_bounds_click() {
    let tags = languages();
    let cx = WidgetContext::new();
    tags.on_focus();
    assert!(tags.on_item_hover(1).is_handled());
    assert_eq!(tags.highlighted(), Some(1));
    assert_eq!(tags.on_item_hover(9), EventResult::Ignored);
    assert_eq!(tags.on_item_click(9, &cx), EventResult::Ignored);
    assert!(tags.tags().is_empty());
}

#[test]
fn test_rule_can_read_tags() {
    use std::sync::{Arc, OnceLock};

    let slot: Arc<OnceLock<TagInput>> = Arc::new(OnceLock::new());
    let reader = Arc::clone(&slot);
    let tags = TagInput::with_validator(Validator::english().custom(
        MessageKey::Custom("validation.one_tag"),
        move |_| reader.get().is_some_and(|t| t.tags().len() <= 1),
    ));
    tags.set_items(&[("en", "English"), ("fr", "French")]);
    slot.set(tags.clone()).unwrap();

    tags.add_tag("en");
    tags.add_tag("fr");
    assert!(tags.validate().is_invalid());

    assert_eq!(tags.remove_last_tag().as_deref(), Some("fr"));
    assert!(!tags.has_error());
    assert!(tags.field().is_valid());
}
