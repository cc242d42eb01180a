use serde_json::json;

use form_state::{FieldDefinition, FieldValue, prepare_fields};

#[test]
fn prepare_keeps_order_and_defaults() {
    let definitions = vec![
        FieldDefinition::new("title").with_initial_value("Draft"),
        FieldDefinition::new("body"),
        FieldDefinition::new("tags").with_initial_value(json!(["a"])),
    ];
    let fields = prepare_fields(&definitions);

    let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
    assert_eq!(names, vec!["title", "body", "tags"]);
    assert_eq!(fields[0].value(), &json!("Draft"));
    assert_eq!(fields[1].value(), &json!(""));
    assert_eq!(fields[1].initial_value(), None);
    assert_eq!(fields[2].initial_value(), Some(&json!(["a"])));
}

#[test]
fn prepare_carries_validators_over() {
    let definition = FieldDefinition::new("code")
        .with_validator(|value: &FieldValue| value.as_str() == Some("XYZ"));
    let fields = prepare_fields(std::slice::from_ref(&definition));

    let carried = fields[0].validator().expect("validator");
    assert!(definition.validator.as_ref().is_some_and(|v| v.same_as(carried)));
    assert!(!fields[0].is_valid());
    assert!(fields[0].with_value(json!("XYZ")).is_valid());
}

#[test]
fn prepare_is_pure() {
    let definitions = vec![FieldDefinition::new("a").with_initial_value(1)];
    let first = prepare_fields(&definitions);
    let second = prepare_fields(&definitions);
    assert_eq!(first[0].value(), second[0].value());
    assert_eq!(definitions[0].initial_value, Some(json!(1)));
}
