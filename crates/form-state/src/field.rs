use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, Result};
use crate::rule::Rule;
use crate::validator::Validator;
use crate::value::{FieldValue, initial_or_empty};

/// Caller-supplied description of one field.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub name: String,
    pub initial_value: Option<FieldValue>,
    pub validator: Option<Validator>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_value: None,
            validator: None,
        }
    }

    pub fn with_initial_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    pub fn with_validator(mut self, validator: impl Into<Validator>) -> Self {
        self.validator = Some(validator.into());
        self
    }
}

/// Untyped definition as it appears in configuration arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RawFieldDefinition {
    pub name: String,
    #[serde(
        default,
        alias = "initial_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub initial_value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<Rule>,
}

impl RawFieldDefinition {
    pub fn into_definition(self) -> Result<FieldDefinition> {
        let validator = self.validate.as_ref().map(Rule::compile).transpose()?;
        Ok(FieldDefinition {
            name: self.name,
            initial_value: self.initial_value,
            validator,
        })
    }
}

/// JSON schema describing one raw field definition.
pub fn definition_schema() -> Value {
    schemars::schema_for!(RawFieldDefinition).to_value()
}

/// Live field record held by a store.
///
/// The name never changes; updates produce a new record through
/// [`FormField::with_value`].
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    name: String,
    value: FieldValue,
    #[serde(skip)]
    initial_value: Option<FieldValue>,
    #[serde(skip)]
    validator: Option<Validator>,
}

impl FormField {
    pub fn from_definition(definition: &FieldDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            value: initial_or_empty(definition.initial_value.as_ref()),
            initial_value: definition.initial_value.clone(),
            validator: definition.validator.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn initial_value(&self) -> Option<&FieldValue> {
        self.initial_value.as_ref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    /// Copy of this record carrying `value`.
    pub fn with_value(&self, value: FieldValue) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Copy of this record with its value re-derived from the default.
    pub fn reset(&self) -> Self {
        self.with_value(initial_or_empty(self.initial_value.as_ref()))
    }

    /// Copy of this record adopting the default and validator of
    /// `definition`, with the value re-derived from that default. The name
    /// is kept.
    pub fn settle(&self, definition: &FieldDefinition) -> Self {
        Self {
            name: self.name.clone(),
            value: initial_or_empty(definition.initial_value.as_ref()),
            initial_value: definition.initial_value.clone(),
            validator: definition.validator.clone(),
        }
    }

    /// True when both records carry the same name, value, default and
    /// validator closure.
    pub fn same_record(&self, other: &FormField) -> bool {
        let same_validator = match (&self.validator, &other.validator) {
            (None, None) => true,
            (Some(left), Some(right)) => left.same_as(right),
            _ => false,
        };
        self.name == other.name
            && self.value == other.value
            && self.initial_value == other.initial_value
            && same_validator
    }

    /// Fails closed: a field without a validator is never valid.
    pub fn is_valid(&self) -> bool {
        self.validator
            .as_ref()
            .is_some_and(|validator| validator.check(&self.value))
    }
}

/// Turns definitions into field records, keeping their order.
pub fn prepare_fields(definitions: &[FieldDefinition]) -> Vec<FormField> {
    definitions.iter().map(FormField::from_definition).collect()
}

/// Normalizes untyped definition objects. `initialValue` and `validate` may be absent.
pub fn prepare_raw_fields(entries: &[Value]) -> Result<Vec<FormField>> {
    let definitions = raw_definitions(entries)?;
    Ok(prepare_fields(&definitions))
}

pub(crate) fn raw_definitions(entries: &[Value]) -> Result<Vec<FieldDefinition>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let Some(object) = entry.as_object() else {
                return Err(FormError::definition(index, "expected an object"));
            };
            match object.get("name") {
                Some(Value::String(_)) => {}
                Some(_) => return Err(FormError::definition(index, "'name' must be a string")),
                None => return Err(FormError::definition(index, "missing 'name'")),
            }
            let raw: RawFieldDefinition = serde_json::from_value(entry.clone())
                .map_err(|err| FormError::definition(index, err.to_string()))?;
            raw.into_definition()
        })
        .collect()
}
