use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::field::{FieldDefinition, raw_definitions};

/// Form configuration: an ordered array of raw field definitions.
///
/// Accepts either `{ "fields": [...] }` or the bare array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormConfig {
    #[serde(default)]
    pub fields: Vec<Value>,
}

impl FormConfig {
    pub fn from_json_str(config_json: &str) -> Result<Self> {
        if config_json.trim().is_empty() {
            return Ok(Self::default());
        }
        match serde_json::from_str::<Value>(config_json)? {
            Value::Array(fields) => Ok(Self { fields }),
            other => Ok(serde_json::from_value(other)?),
        }
    }

    pub fn definitions(&self) -> Result<Vec<FieldDefinition>> {
        raw_definitions(&self.fields)
    }
}

/// JSON schema describing the `{ "fields": [...] }` config object.
pub fn config_schema() -> Value {
    schemars::schema_for!(FormConfig).to_value()
}
