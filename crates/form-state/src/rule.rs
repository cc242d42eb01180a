use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, Result};
use crate::validator::Validator;

/// Declarative validation rule carried by raw field definitions.
///
/// Rules that inspect text reject non-string values; `range` rejects
/// non-numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Rule {
    NonEmpty,
    Contains {
        needle: String,
    },
    Pattern {
        pattern: String,
    },
    MinLen {
        min: usize,
    },
    MaxLen {
        max: usize,
    },
    Range {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    All {
        rules: Vec<Rule>,
    },
    Any {
        rules: Vec<Rule>,
    },
}

impl Rule {
    /// Builds the predicate for this rule. Patterns are compiled once, here.
    pub fn compile(&self) -> Result<Validator> {
        let validator = match self {
            Rule::NonEmpty => Validator::new(|value| match value {
                Value::String(text) => !text.is_empty(),
                Value::Array(items) => !items.is_empty(),
                Value::Object(map) => !map.is_empty(),
                Value::Null => false,
                _ => true,
            }),
            Rule::Contains { needle } => {
                let needle = needle.clone();
                Validator::new(move |value| {
                    value.as_str().is_some_and(|text| text.contains(&needle))
                })
            }
            Rule::Pattern { pattern } => {
                let regex = Regex::new(pattern).map_err(|source| FormError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                Validator::new(move |value| value.as_str().is_some_and(|text| regex.is_match(text)))
            }
            Rule::MinLen { min } => {
                let min = *min;
                Validator::new(move |value| {
                    value
                        .as_str()
                        .is_some_and(|text| text.chars().count() >= min)
                })
            }
            Rule::MaxLen { max } => {
                let max = *max;
                Validator::new(move |value| {
                    value
                        .as_str()
                        .is_some_and(|text| text.chars().count() <= max)
                })
            }
            Rule::Range { min, max } => {
                let (min, max) = (*min, *max);
                Validator::new(move |value| {
                    let Some(number) = value.as_f64() else {
                        return false;
                    };
                    min.is_none_or(|min| number >= min) && max.is_none_or(|max| number <= max)
                })
            }
            Rule::All { rules } => {
                let parts = compile_all(rules)?;
                Validator::new(move |value| parts.iter().all(|part| part.check(value)))
            }
            Rule::Any { rules } => {
                let parts = compile_all(rules)?;
                Validator::new(move |value| parts.iter().any(|part| part.check(value)))
            }
        };
        Ok(validator)
    }
}

fn compile_all(rules: &[Rule]) -> Result<Vec<Validator>> {
    rules.iter().map(Rule::compile).collect()
}
