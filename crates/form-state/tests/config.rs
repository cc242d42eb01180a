use serde_json::{Value, json};

use form_state::{FormConfig, FormError, FormFieldStore, prepare_raw_fields};

fn fixture(name: &str) -> &'static str {
    match name {
        "signup_form" => include_str!("../tests/fixtures/signup_form.json"),
        _ => panic!("unknown fixture {}", name),
    }
}

#[test]
fn fixture_seeds_store() {
    let store = FormFieldStore::from_json_str(fixture("signup_form")).expect("store");
    let names: Vec<&str> = store.names().collect();
    assert_eq!(names, vec!["email", "nickname", "age", "country"]);
    assert_eq!(store.get_value("nickname"), Some(&json!("")));
    assert_eq!(store.get_value("country"), Some(&json!("BE")));
}

#[test]
fn fixture_rules_drive_validation() {
    let mut store = FormFieldStore::from_json_str(fixture("signup_form")).expect("store");
    assert!(!store.validate("email"));
    assert!(!store.validate("nickname"));
    assert!(store.validate("age"));
    assert!(store.validate("country"));

    store.set_value("email", "a@b.com");
    store.set_value("age", 12);
    store.set_value("country", "belgium");

    let report = store.validate_all();
    assert!(!report.valid);
    assert_eq!(report.invalid, vec!["nickname", "age", "country"]);
}

#[test]
fn raw_fields_tolerate_missing_defaults() {
    let fields = prepare_raw_fields(&[
        json!({ "name": "first" }),
        json!({ "name": "second", "initialValue": null }),
        json!({ "name": "third", "initialValue": false, "extra": "ignored" }),
    ])
    .expect("fields");

    let values: Vec<&Value> = fields.iter().map(|field| field.value()).collect();
    assert_eq!(values, vec![&json!(""), &json!(""), &json!(false)]);
    assert!(fields.iter().all(|field| field.validator().is_none()));
}

#[test]
fn raw_fields_require_a_name() {
    let err = prepare_raw_fields(&[json!({ "name": "ok" }), json!({ "initialValue": 1 })])
        .unwrap_err();
    assert!(matches!(err, FormError::InvalidDefinition { index: 1, .. }));

    let err = prepare_raw_fields(&[json!("email")]).unwrap_err();
    assert!(matches!(err, FormError::InvalidDefinition { index: 0, .. }));

    let err = prepare_raw_fields(&[json!({ "name": 7 })]).unwrap_err();
    assert!(err.to_string().contains("'name' must be a string"));
}

#[test]
fn unknown_rule_is_a_definition_error() {
    let err = FormFieldStore::from_raw(&[json!({
        "name": "code",
        "validate": { "op": "telepathy" }
    })])
    .unwrap_err();
    assert!(matches!(err, FormError::InvalidDefinition { index: 0, .. }));
}

#[test]
fn bad_pattern_surfaces_from_config() {
    let config = FormConfig {
        fields: vec![json!({
            "name": "zip",
            "validate": { "op": "pattern", "pattern": "[0-9" }
        })],
    };
    let err = FormFieldStore::from_config(&config).unwrap_err();
    assert!(matches!(err, FormError::InvalidPattern { .. }));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = FormFieldStore::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, FormError::ConfigParse(_)));
}

#[test]
fn blank_config_gives_empty_store() {
    let store = FormFieldStore::from_json_str("").expect("store");
    assert!(store.is_empty());
}
