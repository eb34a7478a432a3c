use trellis::validation::rules::{self, Rule};
use trellis::validation::{MessageKey, PasswordPolicy, Validator, validate};
use trellis::validation::EnglishMessages;

fn key_of(rule: &Rule, input: &str) -> Option<MessageKey> {
    rule.check(Some(input)).err().map(|violation| violation.key)
}

#[test]
fn test_required_rejects_empty_and_whitespace() {
    let rule = rules::required();
    assert_eq!(key_of(&rule, ""), Some(MessageKey::Required));
    assert_eq!(key_of(&rule, "   "), Some(MessageKey::Required));
    assert_eq!(rule.check(None).err().map(|v| v.key), Some(MessageKey::Required));
    assert!(rule.check(Some(" x ")).is_ok());
}

#[test]
fn test_non_required_rules_accept_empty() {
    let policy = PasswordPolicy::default();
    let all = [
        rules::min_length(3),
        rules::max_length(1),
        rules::exact_length(4),
        rules::email(),
        rules::url(),
        rules::numeric(),
        rules::integer(),
        rules::min_value(10.0),
        rules::max_value(0.0),
        rules::password(policy),
        rules::one_of(["a"]),
    ];
    for rule in &all {
        assert!(rule.check(Some("")).is_ok(), "{} rejected empty input", rule.name());
        assert!(rule.check(None).is_ok(), "{} rejected missing input", rule.name());
    }
}

#[test]
fn test_length_counts_characters() {
    let rule = rules::min_length(3);
    assert!(rule.check(Some("héé")).is_ok());
    assert_eq!(key_of(&rule, "ab"), Some(MessageKey::MinLength));

    let rule = rules::max_length(3);
    assert!(rule.check(Some("abc")).is_ok());
    assert_eq!(key_of(&rule, "abcd"), Some(MessageKey::MaxLength));

    let rule = rules::exact_length(2);
    assert_eq!(key_of(&rule, "a"), Some(MessageKey::ExactLength));
    assert!(rule.check(Some("ab")).is_ok());
}

#[test]
fn test_length_violation_carries_param() {
    let violation = rules::min_length(8).check(Some("short")).unwrap_err();
    assert_eq!(violation.params, vec![("min", "8".to_string())]);
}

#[test]
fn test_pattern_is_anchored() {
    let rule = rules::pattern("[a-z]+").unwrap();
    assert!(rule.check(Some("abc")).is_ok());
    assert_eq!(key_of(&rule, "abc1"), Some(MessageKey::Pattern));
    assert_eq!(key_of(&rule, "1abc"), Some(MessageKey::Pattern));
}

#[test]
fn test_invalid_pattern_is_an_error() {
    let err = rules::pattern("[unclosed").unwrap_err();
    assert!(err.to_string().contains("[unclosed"));
}

#[test]
fn test_email() {
    let rule = rules::email();
    assert!(rule.check(Some("user@example.com")).is_ok());
    assert_eq!(key_of(&rule, "not-an-email"), Some(MessageKey::Email));
    assert_eq!(key_of(&rule, "user@"), Some(MessageKey::Email));
}

#[test]
fn test_url_requires_http_scheme() {
    let rule = rules::url();
    assert!(rule.check(Some("https://example.com/path")).is_ok());
    assert!(rule.check(Some("http://localhost:8080")).is_ok());
    assert_eq!(key_of(&rule, "ftp://example.com"), Some(MessageKey::Url));
    assert_eq!(key_of(&rule, "example.com"), Some(MessageKey::Url));
}

#[test]
fn test_numeric_and_integer() {
    let numeric = rules::numeric();
    assert!(numeric.check(Some("-3.5")).is_ok());
    assert_eq!(key_of(&numeric, "abc"), Some(MessageKey::Numeric));
    assert_eq!(key_of(&numeric, "NaN"), Some(MessageKey::Numeric));
    assert_eq!(key_of(&numeric, "inf"), Some(MessageKey::Numeric));

    let integer = rules::integer();
    assert!(integer.check(Some("42")).is_ok());
    assert_eq!(key_of(&integer, "4.2"), Some(MessageKey::Integer));
}

#[test]
fn test_value_bounds() {
    let min = rules::min_value(18.0);
    assert!(min.check(Some("18")).is_ok());
    assert_eq!(key_of(&min, "17.9"), Some(MessageKey::MinValue));
    assert_eq!(key_of(&min, "old"), Some(MessageKey::Numeric));

    let max = rules::max_value(100.0);
    assert!(max.check(Some("100")).is_ok());
    assert_eq!(key_of(&max, "101"), Some(MessageKey::MaxValue));
}

#[test]
fn test_password_reports_first_unmet_requirement() {
    let rule = rules::password(PasswordPolicy::default());
    assert_eq!(key_of(&rule, "Ab1+"), Some(MessageKey::PasswordTooShort));
    assert_eq!(key_of(&rule, "PASSWORD1+"), Some(MessageKey::PasswordNoLowercase));
    assert_eq!(key_of(&rule, "password1+"), Some(MessageKey::PasswordNoUppercase));
    assert_eq!(key_of(&rule, "Password+"), Some(MessageKey::PasswordNoDigits));
    assert_eq!(key_of(&rule, "Password1"), Some(MessageKey::PasswordNoSpecial));
    assert!(rule.check(Some("Password1+")).is_ok());
}

#[test]
fn test_password_policy_toggles() {
    let policy = PasswordPolicy::new().min_length(4).require_special(false);
    let rule = rules::password(policy);
    assert!(rule.check(Some("Abc1")).is_ok());
}

#[test]
fn test_password_policy_from_json() {
    let policy: PasswordPolicy =
        serde_json::from_str(r#"{"min_length": 12, "require_special": false}"#).unwrap();
    assert_eq!(policy.min_length, 12);
    assert!(!policy.require_special);
    assert!(policy.require_digit);
}

#[test]
fn test_matches_compares_empty_input() {
    let rule = rules::matches("abc");
    assert_eq!(key_of(&rule, ""), Some(MessageKey::Matches));
    assert_eq!(rule.check(None).err().map(|v| v.key), Some(MessageKey::Matches));
    assert_eq!(key_of(&rule, "abd"), Some(MessageKey::Matches));
    assert!(rule.check(Some("abc")).is_ok());
}

#[test]
fn test_matches_with_reads_live_value() {
    let other = std::sync::Arc::new(std::sync::RwLock::new("first".to_string()));
    let source = other.clone();
    let rule = rules::matches_with(move || source.read().unwrap().clone());

    assert!(rule.check(Some("first")).is_ok());
    *other.write().unwrap() = "second".to_string();
    assert_eq!(key_of(&rule, "first"), Some(MessageKey::Matches));
}

#[test]
fn test_one_of_and_custom() {
    let rule = rules::one_of(["red", "green"]);
    assert!(rule.check(Some("red")).is_ok());
    assert_eq!(key_of(&rule, "blue"), Some(MessageKey::OneOf));

    let even = rules::custom(MessageKey::Custom("validation.even"), |value| {
        value.parse::<u32>().is_ok_and(|n| n % 2 == 0)
    });
    assert!(even.check(Some("4")).is_ok());
    assert_eq!(key_of(&even, "3"), Some(MessageKey::Custom("validation.even")));
}

#[test]
fn test_validate_stops_at_first_failure() {
    let rules = [rules::required(), rules::min_length(3), rules::email()];
    let result = validate(Some("ab"), &rules, &EnglishMessages);
    assert_eq!(result.key(), Some(MessageKey::MinLength));
    assert_eq!(result.message(), Some("Must be at least 3 characters"));

    let result = validate(Some(""), &rules, &EnglishMessages);
    assert_eq!(result.key(), Some(MessageKey::Required));
}

#[test]
fn test_validation_is_deterministic() {
    let validator = Validator::english().required().min_length(5);
    let first = validator.validate("abc");
    let second = validator.validate("abc");
    assert_eq!(first, second);
}

#[test]
fn test_for_field_prepends_required_once() {
    let validator = Validator::english().min_length(2).for_field(false);
    assert_eq!(validator.rules()[0].name(), "required");
    assert_eq!(validator.len(), 2);

    let validator = validator.for_field(false);
    assert_eq!(validator.len(), 2);

    let optional = Validator::english().min_length(2).for_field(true);
    assert_eq!(optional.len(), 1);
    assert!(optional.validate("").is_valid());
}

#[test]
fn test_validator_builder_pattern_error() {
    assert!(Validator::english().pattern("(").is_err());
    assert!(Validator::english().pattern("[0-9]{4}").is_ok());
}

#[test]
fn test_validate_opt_missing_value() {
    let required = Validator::english().required();
    assert_eq!(required.validate_opt(None).key(), Some(MessageKey::Required));

    let optional = Validator::english().min_length(2);
    assert!(optional.validate_opt(None).is_valid());
    assert_eq!(optional.validate_opt(Some("a")).key(), Some(MessageKey::MinLength));
}

#[test]
fn test_with_rules_keeps_order() {
    let validator = Validator::english()
        .min_length(1)
        .with_rules([rules::required(), rules::email()]);
    let names: Vec<&str> = validator.rules().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["min_length", "required", "email"]);
    assert_eq!(validator.validate("x").key(), Some(MessageKey::Email));
    assert_eq!(validator.validate("").key(), Some(MessageKey::Required));
}
