use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormError>;

/// Failures raised while turning untyped input into field records.
///
/// Store operations never produce these; unknown names and missing
/// validators degrade to fallback values instead.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("field definition #{index} is invalid: {reason}")]
    InvalidDefinition { index: usize, reason: String },
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("failed to parse form config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl FormError {
    pub(crate) fn definition(index: usize, reason: impl Into<String>) -> Self {
        FormError::InvalidDefinition {
            index,
            reason: reason.into(),
        }
    }
}
