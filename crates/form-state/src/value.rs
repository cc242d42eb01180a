use serde_json::Value;

/// Current value of a form field. Any JSON shape is accepted.
pub type FieldValue = Value;

/// Value a field starts with when its definition carries no default.
pub fn empty_value() -> FieldValue {
    Value::String(String::new())
}

/// Resolves a definition default; `None` and `null` both become the empty string.
pub(crate) fn initial_or_empty(initial: Option<&FieldValue>) -> FieldValue {
    match initial {
        None | Some(Value::Null) => empty_value(),
        Some(value) => value.clone(),
    }
}
