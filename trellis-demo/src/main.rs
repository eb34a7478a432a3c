use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use simplelog::{Config, LevelFilter, WriteLogger};
use trellis::input::convert_key_event;
use trellis::prelude::*;

/// One input on the sign-up form.
enum Input {
    Text { field: ValidatedField, secret: bool },
    Choice(Autocomplete),
    Tags(TagInput),
}

impl Input {
    fn widget_id(&self) -> String {
        match self {
            Input::Text { field, .. } => field.id_string(),
            Input::Choice(autocomplete) => autocomplete.id_string(),
            Input::Tags(tags) => tags.id_string(),
        }
    }

    fn error(&self) -> Option<String> {
        match self {
            Input::Text { field, .. } => field.error(),
            Input::Choice(autocomplete) => autocomplete.field().error(),
            Input::Tags(tags) => tags.field().error(),
        }
    }

    fn focus(&self) {
        match self {
            Input::Text { .. } => {}
            Input::Choice(autocomplete) => autocomplete.on_focus(),
            Input::Tags(tags) => tags.on_focus(),
        }
    }

    fn blur(&self) {
        match self {
            Input::Text { .. } => {}
            Input::Choice(autocomplete) => autocomplete.on_blur(),
            Input::Tags(tags) => tags.on_blur(),
        }
    }

    fn on_key(&self, key: &KeyCombo, cx: &WidgetContext) -> EventResult {
        match self {
            Input::Text { field, .. } => edit_text(field, key),
            Input::Choice(autocomplete) => autocomplete.on_key(key, cx),
            Input::Tags(tags) => tags.on_key(key, cx),
        }
    }

    /// Lines to draw under the label: value, suggestions, error.
    fn render(&self, focused: bool) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            Input::Text { field, secret } => {
                let value = field.value();
                let shown = if *secret {
                    "*".repeat(value.chars().count())
                } else {
                    value
                };
                lines.push(format!("  [{shown}]"));
            }
            Input::Choice(autocomplete) => {
                let value = autocomplete.value();
                if value.is_empty() {
                    lines.push(format!("  [{}]", autocomplete.placeholder()));
                } else {
                    lines.push(format!("  [{value}]"));
                }
                if focused && autocomplete.is_open() {
                    lines.extend(suggestion_lines(
                        &autocomplete.filtered_items(),
                        autocomplete.highlighted(),
                    ));
                }
            }
            Input::Tags(tags) => {
                let chips: Vec<String> = tags
                    .tag_labels()
                    .iter()
                    .map(|label| format!("<{label}>"))
                    .collect();
                lines.push(format!("  {} [{}]", chips.join(" "), tags.query()));
                if focused && tags.is_open() {
                    lines.extend(suggestion_lines(&tags.filtered_items(), tags.highlighted()));
                }
            }
        }
        if let Some(error) = self.error() {
            lines.push(format!("  ! {error}"));
        }
        lines
    }
}

fn suggestion_lines(items: &[(String, String)], highlighted: Option<usize>) -> Vec<String> {
    items
        .iter()
        .take(5)
        .enumerate()
        .map(|(index, (_, label))| {
            let marker = if highlighted == Some(index) { '>' } else { ' ' };
            format!("   {marker} {label}")
        })
        .collect()
}

/// Minimal line editing for plain fields.
fn edit_text(field: &ValidatedField, key: &KeyCombo) -> EventResult {
    if key.modifiers.is_shortcut() {
        return EventResult::Ignored;
    }
    let mut value = field.value();
    match key.key {
        Key::Backspace => {
            if value.pop().is_none() {
                return EventResult::Ignored;
            }
        }
        other => match other.typed_char() {
            Some(c) => value.push(c),
            None => return EventResult::Ignored,
        },
    }
    field.set_value(value);
    EventResult::Consumed
}

fn load_translator() -> io::Result<Arc<dyn Translate>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            let catalog = MessageCatalog::from_json(&json).map_err(io::Error::other)?;
            log::info!("Using message catalog {}", path);
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(EnglishMessages)),
    }
}

struct SignUp {
    labels: Vec<&'static str>,
    inputs: Vec<Input>,
    form: Form,
    _handles: Vec<FieldHandle>,
}

fn build_form(translator: Arc<dyn Translate>) -> io::Result<SignUp> {
    let validator = || Validator::with_translator(translator.clone());
    let required = FieldConfig::new();

    let username = ValidatedField::with_config(
        validator()
            .min_length(3)
            .max_length(20)
            .pattern("[A-Za-z0-9_]+")
            .map_err(io::Error::other)?,
        &required,
    );
    let email = ValidatedField::with_config(validator().email(), &required);
    let password = ValidatedField::with_config(
        validator().password(PasswordPolicy::default()),
        &required,
    );
    let live_password = password.clone();
    let confirm = ValidatedField::with_config(
        validator().matches_with(move || live_password.value()),
        &required,
    );

    let country = Autocomplete::with_field(ValidatedField::with_config(
        validator().one_of(["Belgium", "Canada", "France", "Germany", "Japan", "Norway"]),
        &required,
    ));
    country.set_placeholder("Search countries...");
    country.set_items(&[
        ("be", "Belgium"),
        ("ca", "Canada"),
        ("fr", "France"),
        ("de", "Germany"),
        ("jp", "Japan"),
        ("no", "Norway"),
    ]);

    let languages = TagInput::with_field(ValidatedField::with_config(
        validator(),
        &FieldConfig::new().optional(),
    ));
    languages.set_items(&[
        ("en", "English"),
        ("fr", "French"),
        ("de", "German"),
        ("ja", "Japanese"),
        ("nl", "Dutch"),
    ]);

    let form = Form::new();
    let handles = vec![
        form.add_field(&username, "username"),
        form.add_field(&email, "email"),
        form.add_field(&password, "password"),
        form.add_field(&confirm, "confirm"),
        form.add_field(&country, "country"),
        form.add_field(&languages, "languages"),
    ];

    Ok(SignUp {
        labels: vec![
            "Username",
            "Email",
            "Password",
            "Confirm password",
            "Country",
            "Languages",
        ],
        inputs: vec![
            Input::Text {
                field: username,
                secret: false,
            },
            Input::Text {
                field: email,
                secret: false,
            },
            Input::Text {
                field: password,
                secret: true,
            },
            Input::Text {
                field: confirm,
                secret: true,
            },
            Input::Choice(country),
            Input::Tags(languages),
        ],
        form,
        _handles: handles,
    })
}

fn draw(out: &mut impl Write, signup: &SignUp, focus: usize, status: &str) -> io::Result<()> {
    let mut lines = vec![
        "Sign up  (Tab: next field, Enter/Ctrl+S: submit, Ctrl+Q: quit)".to_string(),
        String::new(),
    ];
    for (index, (label, input)) in signup.labels.iter().zip(&signup.inputs).enumerate() {
        let marker = if index == focus { '>' } else { ' ' };
        lines.push(format!("{marker} {label}"));
        lines.extend(input.render(index == focus));
    }
    lines.push(String::new());
    lines.push(status.to_string());

    queue!(out, Clear(ClearType::All))?;
    for (row, text) in (0u16..).zip(&lines) {
        queue!(out, MoveTo(0, row), Print(text))?;
    }
    out.flush()
}

fn run(signup: &SignUp) -> io::Result<()> {
    let mut out = io::stdout();
    let cx = WidgetContext::new();
    let mut focus = 0;
    let mut status = String::new();
    signup.inputs[focus].focus();

    loop {
        draw(&mut out, signup, focus, &status)?;

        let Event::Key(raw) = event::read()? else {
            continue;
        };
        let Some(key) = convert_key_event(raw) else {
            continue;
        };

        if key == KeyCombo::key(Key::Char('q')).ctrl() {
            return Ok(());
        }

        let result = if key.key == Key::Tab {
            EventResult::Ignored
        } else {
            signup.inputs[focus].on_key(&key, &cx)
        };

        for event in cx.drain_events() {
            log::debug!("{:?}", event);
        }
        cx.take_focus_request();

        if result.is_handled() {
            continue;
        }

        let submit = key == KeyCombo::key(Key::Enter) || key == KeyCombo::key(Key::Char('s')).ctrl();
        if key.key == Key::Tab {
            signup.inputs[focus].blur();
            focus = (focus + 1) % signup.inputs.len();
            signup.inputs[focus].focus();
        } else if submit {
            let errors = signup.form.validate_all();
            match errors.first() {
                None => {
                    log::info!("Sign-up form submitted");
                    status = "Submitted!".to_string();
                }
                Some(first) => {
                    log::info!("Sign-up form has {} errors", errors.len());
                    status = format!("{}: {}", first.field_name, first.message);
                    if let Some(index) = signup
                        .inputs
                        .iter()
                        .position(|input| input.widget_id() == first.widget_id)
                    {
                        signup.inputs[focus].blur();
                        focus = index;
                        signup.inputs[focus].focus();
                    }
                }
            }
        }
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("trellis-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .map_err(io::Error::other)?;

    let signup = build_form(load_translator()?)?;

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let result = run(&signup);
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    result
}
