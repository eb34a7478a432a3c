//! Built-in validation rules.
//!
//! Every rule except [`required`] and [`matches`] accepts empty input, so an
//! optional field only fails when the user actually typed something wrong.
//! Presence is enforced by putting `required` first, which
//! [`Validator::for_field`](super::Validator::for_field) does for
//! non-optional fields.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use super::config::PasswordPolicy;
use super::translate::{MessageKey, Param};
use crate::error::{Error, Result};

/// Why a rule rejected a value, before translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Which rule failed.
    pub key: MessageKey,
    /// Parameters for the message template.
    pub params: Vec<Param>,
}

impl Violation {
    /// Create a violation without parameters.
    pub fn new(key: MessageKey) -> Self {
        Self {
            key,
            params: Vec::new(),
        }
    }

    /// Attach a message parameter.
    pub fn with_param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }
}

type Check = dyn Fn(Option<&str>) -> std::result::Result<(), Violation> + Send + Sync;

/// A single validation rule.
///
/// Cheap to clone; the check itself is shared.
#[derive(Clone)]
pub struct Rule {
    name: &'static str,
    check: Arc<Check>,
}

impl Rule {
    /// Create a rule from a check function.
    ///
    /// The check sees `None` when the host has no value at all.
    pub fn new<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(Option<&str>) -> std::result::Result<(), Violation> + Send + Sync + 'static,
    {
        Self {
            name,
            check: Arc::new(check),
        }
    }

    /// Create a rule that only runs on non-empty input.
    fn non_empty<F>(name: &'static str, check: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<(), Violation> + Send + Sync + 'static,
    {
        Self::new(name, move |input| match input {
            Some(value) if !value.is_empty() => check(value),
            _ => Ok(()),
        })
    }

    /// Short rule name, e.g. `"min_length"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run the rule against an input.
    pub fn check(&self, input: Option<&str>) -> std::result::Result<(), Violation> {
        (self.check)(input)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn fail(key: MessageKey) -> std::result::Result<(), Violation> {
    Err(Violation::new(key))
}

/// Require a value that is not empty or all whitespace.
pub fn required() -> Rule {
    Rule::new("required", |input| match input {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => fail(MessageKey::Required),
    })
}

/// Require at least `min` characters.
pub fn min_length(min: usize) -> Rule {
    Rule::non_empty("min_length", move |value| {
        if value.chars().count() >= min {
            Ok(())
        } else {
            Err(Violation::new(MessageKey::MinLength).with_param("min", min))
        }
    })
}

/// Require at most `max` characters.
pub fn max_length(max: usize) -> Rule {
    Rule::non_empty("max_length", move |value| {
        if value.chars().count() <= max {
            Ok(())
        } else {
            Err(Violation::new(MessageKey::MaxLength).with_param("max", max))
        }
    })
}

/// Require exactly `len` characters.
pub fn exact_length(len: usize) -> Rule {
    Rule::non_empty("exact_length", move |value| {
        if value.chars().count() == len {
            Ok(())
        } else {
            Err(Violation::new(MessageKey::ExactLength).with_param("len", len))
        }
    })
}

/// Require the whole value to match a regex.
///
/// The pattern is anchored at both ends, so `[a-z]+` rejects `"abc1"`.
pub fn pattern(pattern: &str) -> Result<Rule> {
    let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(Rule::non_empty("pattern", move |value| {
        if re.is_match(value) {
            Ok(())
        } else {
            fail(MessageKey::Pattern)
        }
    }))
}

/// Require a syntactically valid email address.
pub fn email() -> Rule {
    Rule::non_empty("email", |value| {
        if email_address::EmailAddress::is_valid(value) {
            Ok(())
        } else {
            fail(MessageKey::Email)
        }
    })
}

/// Require an absolute `http` or `https` URL.
pub fn url() -> Rule {
    Rule::non_empty("url", |value| match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => fail(MessageKey::Url),
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Require a finite decimal number. Surrounding whitespace is not trimmed.
pub fn numeric() -> Rule {
    Rule::non_empty("numeric", |value| match parse_number(value) {
        Some(_) => Ok(()),
        None => fail(MessageKey::Numeric),
    })
}

/// Require a whole number.
pub fn integer() -> Rule {
    Rule::non_empty("integer", |value| match value.parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => fail(MessageKey::Integer),
    })
}

/// Require a number no smaller than `min`.
pub fn min_value(min: f64) -> Rule {
    Rule::non_empty("min_value", move |value| match parse_number(value) {
        Some(n) if n >= min => Ok(()),
        Some(_) => Err(Violation::new(MessageKey::MinValue).with_param("min", min)),
        None => fail(MessageKey::Numeric),
    })
}

/// Require a number no larger than `max`.
pub fn max_value(max: f64) -> Rule {
    Rule::non_empty("max_value", move |value| match parse_number(value) {
        Some(n) if n <= max => Ok(()),
        Some(_) => Err(Violation::new(MessageKey::MaxValue).with_param("max", max)),
        None => fail(MessageKey::Numeric),
    })
}

/// Check a password against a policy.
///
/// Reports the first unmet requirement, in the order: length, lowercase,
/// uppercase, digit, special character.
pub fn password(policy: PasswordPolicy) -> Rule {
    Rule::non_empty("password", move |value| {
        if value.chars().count() < policy.min_length {
            return Err(
                Violation::new(MessageKey::PasswordTooShort).with_param("min", policy.min_length)
            );
        }
        if policy.require_lowercase && !value.chars().any(char::is_lowercase) {
            return fail(MessageKey::PasswordNoLowercase);
        }
        if policy.require_uppercase && !value.chars().any(char::is_uppercase) {
            return fail(MessageKey::PasswordNoUppercase);
        }
        if policy.require_digit && !value.chars().any(|c| c.is_ascii_digit()) {
            return fail(MessageKey::PasswordNoDigits);
        }
        if policy.require_special
            && !value
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        {
            return fail(MessageKey::PasswordNoSpecial);
        }
        Ok(())
    })
}

/// Require the value to equal `other` exactly.
///
/// Unlike the other rules, empty input is compared too: a blank
/// confirmation does not match a non-blank original.
pub fn matches(other: impl Into<String>) -> Rule {
    let other = other.into();
    Rule::new("matches", move |input| {
        if input.unwrap_or_default() == other {
            Ok(())
        } else {
            fail(MessageKey::Matches)
        }
    })
}

/// Like [`matches`], but reads the other value at validation time.
///
/// Use this for confirmation fields bound to a live password input.
pub fn matches_with<F>(other: F) -> Rule
where
    F: Fn() -> String + Send + Sync + 'static,
{
    Rule::new("matches", move |input| {
        if input.unwrap_or_default() == other() {
            Ok(())
        } else {
            fail(MessageKey::Matches)
        }
    })
}

/// Require the value to be one of `allowed`.
pub fn one_of<I, S>(allowed: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    Rule::non_empty("one_of", move |value| {
        if allowed.iter().any(|a| a == value) {
            Ok(())
        } else {
            fail(MessageKey::OneOf)
        }
    })
}

/// A host-defined rule, reported under `key` when `predicate` returns false.
pub fn custom<F>(key: MessageKey, predicate: F) -> Rule
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    Rule::non_empty("custom", move |value| {
        if predicate(value) {
            Ok(())
        } else {
            fail(key)
        }
    })
}
