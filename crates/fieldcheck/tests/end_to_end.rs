//! Validating a whole form: one rule set per field, every failure reported.

use fieldcheck::combinators::Chain;
use fieldcheck::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

struct Signup {
    username: String,
    email: String,
    age: i64,
    password: String,
    website: Option<String>,
}

fn check(form: &Signup) -> ValidationErrors {
    let username = Chain::new("username")
        .with(not_empty())
        .with(length_range(3, 16))
        .with(matches_regex("^[a-z0-9_]+$").unwrap());
    let email_rule = email().and(not_disposable(["mailinator.com"])).named("email");
    let age = in_range(18, 120).named("age");
    let password_rule = Password::new().named("password");
    let website = optional(transform(String::clone, url().schemes(["https"]))).named("website");

    let mut errors = ValidationErrors::new();
    errors.extend(username.validate(&form.username).err());
    errors.extend(email_rule.validate(&form.email).err());
    errors.extend(age.validate(&form.age).err());
    errors.extend(password_rule.validate(&form.password).err());
    errors.extend(website.validate(&form.website).err());
    errors
}

#[test]
fn valid_form_passes() {
    let form = Signup {
        username: "lyon_nee".into(),
        email: "lyon.nee@outlook.com".into(),
        age: 25,
        password: "Tr1cky!pass".into(),
        website: None,
    };
    assert!(!check(&form).has_errors());
}

#[test]
fn invalid_form_reports_every_field() {
    let form = Signup {
        username: "Al".into(),
        email: "me@mailinator.com".into(),
        age: 17,
        password: "password".into(),
        website: Some("http://example.com".into()),
    };

    let report = check(&form).messages().join("\n");
    insta::assert_snapshot!(report, @r"
    username: length must be between 3 and 16, got 2; must match pattern ^[a-z0-9_]+$
    email: disposable email addresses are not allowed
    age: value must be between 18 and 120
    password: password must contain an uppercase letter; password must contain a digit; password must contain a special character
    website: url scheme 'http' is not allowed
    ");
}

#[test]
fn age_accumulate_versus_first_failure() {
    let too_young: i32 = 17;
    let error = validate(&too_young, &[&min(18), &max(30)]).unwrap_err();
    assert_eq!(error.messages(), vec!["value is too small, must be at least 18"]);
    assert_eq!(error.kind(), ErrorKind::Aggregate);

    assert!(validate(&25, &[&min(18), &max(30)]).is_ok());

    let error = validate_first(&99, &[&min(18), &max(30)]).unwrap_err();
    assert_eq!(error.code, "max");
}

#[test]
fn email_examples() {
    assert!(validate("lyon.nee@outlook.com", &[&email()]).is_ok());

    let error = validate_field("email", "not-an-email", &[&email()]).unwrap_err();
    insta::assert_snapshot!(error.to_string(), @"email: invalid email format");
}

#[test]
fn json_payload_fields() {
    let payload = json!({ "name": "alice", "age": "thirty", "tags": ["a", "b"] });

    let name: String = get_json(&payload["name"], &[&transform(String::clone, min_length(3))]).unwrap();
    assert_eq!(name, "alice");

    let error = get_json::<i64>(&payload["age"], &[&min(18)]).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::TypeMismatch);
    insta::assert_snapshot!(error.to_string(), @"type mismatch: expected integer, got string");

    let missing = get_json::<String>(&payload["email"], &[]).unwrap_err();
    assert_eq!(missing.param("actual"), Some("null"));
}

#[test]
fn conditional_and_dependent_rules() {
    // Business accounts need a company domain; personal accounts anything valid.
    let business = |address: &str| address.ends_with(".corp");
    let rule = email_domain(["example.corp"]).when(business).and(email());

    assert!(rule.validate("me@example.corp").is_ok());
    assert!(rule.validate("me@gmail.com").is_ok());
    assert!(rule.validate("me@other.corp").is_err());

    let gated = depends_on(not_empty(), email());
    let error = gated.validate("").unwrap_err();
    assert_eq!(error.message, "dependency validation failed: must not be empty");
}

#[test]
fn batches_tag_failures_by_index() {
    let emails = ["a@example.com", "broken", "b@example.com", "also broken"];
    let strings: Vec<String> = emails.iter().map(ToString::to_string).collect();

    let error = validate_all(&strings, &transform(String::clone, email())).unwrap_err();
    assert_eq!(
        error.messages(),
        vec!["element[1]: invalid email format", "element[3]: invalid email format"]
    );
    assert!(validate_any(&strings, &transform(String::clone, email())).is_ok());
}

#[test]
fn rule_macro_defines_domain_rules() {
    fieldcheck::rule! {
        pub Sku for str;
        check(input) { input.len() == 8 && input.starts_with("SKU-") }
        fail(input) { ValidationError::new("sku", format!("'{input}' is not a SKU")) }
        fn sku();
    }

    let codes = fieldcheck::all_of![sku(), max_length(8)];
    assert!(codes.validate("SKU-1234").is_ok());
    assert_eq!(codes.validate("ABC").unwrap_err().messages(), vec!["'ABC' is not a SKU"]);
}
