//! Ordered rule lists and the fluent validator builder.

use std::fmt;
use std::sync::Arc;

use log::trace;

use super::config::PasswordPolicy;
use super::result::ValidationResult;
use super::rules::{self, Rule};
use super::translate::{EnglishMessages, MessageKey, Translate};
use crate::error::Result;

/// Run `rules` in order and return the first failure, translated.
///
/// Stops at the first rule that rejects the input; later rules are not
/// evaluated.
pub fn validate(input: Option<&str>, rules: &[Rule], translator: &dyn Translate) -> ValidationResult {
    for rule in rules {
        if let Err(violation) = rule.check(input) {
            trace!("rule '{}' rejected input: {}", rule.name(), violation.key);
            let message = translator.translate(violation.key, &violation.params);
            return ValidationResult::invalid(violation.key, message);
        }
    }
    ValidationResult::Valid
}

/// An ordered list of rules plus the translator used for their messages.
///
/// Holds no mutable state, so one validator can back any number of fields.
///
/// # Example
///
/// ```ignore
/// let username = Validator::new(EnglishMessages)
///     .min_length(3)
///     .max_length(20)
///     .pattern("[a-z0-9_]+")?
///     .for_field(false);
///
/// assert!(username.validate("").is_invalid()); // required was prepended
/// assert!(username.validate("jo").is_invalid());
/// assert!(username.validate("jo_doe").is_valid());
/// ```
#[derive(Clone)]
pub struct Validator {
    rules: Vec<Rule>,
    translator: Arc<dyn Translate>,
}

impl Validator {
    /// Create an empty validator using the given translator.
    pub fn new(translator: impl Translate + 'static) -> Self {
        Self::with_translator(Arc::new(translator))
    }

    /// Create an empty validator sharing an existing translator.
    pub fn with_translator(translator: Arc<dyn Translate>) -> Self {
        Self {
            rules: Vec::new(),
            translator,
        }
    }

    /// Create an empty validator with English messages.
    pub fn english() -> Self {
        Self::new(EnglishMessages)
    }

    /// Append a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules, keeping their order.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Prepend `required` unless the field is optional.
    ///
    /// Does nothing if a `required` rule is already first.
    pub fn for_field(mut self, optional: bool) -> Self {
        let has_required = self.rules.first().is_some_and(|r| r.name() == "required");
        if !optional && !has_required {
            self.rules.insert(0, rules::required());
        }
        self
    }

    /// Validate a present value.
    pub fn validate(&self, input: &str) -> ValidationResult {
        validate(Some(input), &self.rules, self.translator.as_ref())
    }

    /// Validate a value that may be absent.
    pub fn validate_opt(&self, input: Option<&str>) -> ValidationResult {
        validate(input, &self.rules, self.translator.as_ref())
    }

    /// The rules, in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The translator shared by this validator.
    pub fn translator(&self) -> Arc<dyn Translate> {
        Arc::clone(&self.translator)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

// Built-in rules as builder methods
impl Validator {
    /// Require a non-blank value.
    pub fn required(self) -> Self {
        self.rule(rules::required())
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize) -> Self {
        self.rule(rules::min_length(min))
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize) -> Self {
        self.rule(rules::max_length(max))
    }

    /// Require an exact length (in characters).
    pub fn exact_length(self, len: usize) -> Self {
        self.rule(rules::exact_length(len))
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.rule(rules::pattern(pattern)?))
    }

    /// Require a valid email address.
    pub fn email(self) -> Self {
        self.rule(rules::email())
    }

    /// Require an http(s) URL.
    pub fn url(self) -> Self {
        self.rule(rules::url())
    }

    /// Require a number.
    pub fn numeric(self) -> Self {
        self.rule(rules::numeric())
    }

    /// Require a whole number.
    pub fn integer(self) -> Self {
        self.rule(rules::integer())
    }

    /// Require a number no smaller than `min`.
    pub fn min_value(self, min: f64) -> Self {
        self.rule(rules::min_value(min))
    }

    /// Require a number no larger than `max`.
    pub fn max_value(self, max: f64) -> Self {
        self.rule(rules::max_value(max))
    }

    /// Require a password meeting `policy`.
    pub fn password(self, policy: PasswordPolicy) -> Self {
        self.rule(rules::password(policy))
    }

    /// Require the value to equal another value.
    pub fn matches(self, other: impl Into<String>) -> Self {
        self.rule(rules::matches(other))
    }

    /// Require the value to equal another value read at validation time.
    pub fn matches_with<F>(self, other: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.rule(rules::matches_with(other))
    }

    /// Require one of the allowed values.
    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(rules::one_of(allowed))
    }

    /// Add a custom predicate reported under `key`.
    pub fn custom<F>(self, key: MessageKey, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rule(rules::custom(key, predicate))
    }
}
