//! Form field state for UI hosts.
//!
//! A [`FormFieldStore`] keeps an ordered list of named fields, each with a
//! current value and an optional [`Validator`]. Hosts read values to render
//! inputs, push user edits through [`FormFieldStore::set_value`] and check
//! fields before submitting. Changes are announced to subscribers and every
//! change publishes a fresh [`Fields`] snapshot.
//!
//! ```
//! use form_state::{FieldDefinition, FieldValue, FormFieldStore};
//!
//! let mut store = FormFieldStore::new(vec![
//!     FieldDefinition::new("email")
//!         .with_validator(|value: &FieldValue| value.as_str().is_some_and(|v| v.contains('@'))),
//! ]);
//! assert!(!store.validate("email"));
//! store.set_value("email", "a@b.com");
//! assert!(store.validate("email"));
//! assert!(store.get_value("missing").is_none());
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod rule;
pub mod store;
pub mod validator;
pub mod value;

pub use config::{FormConfig, config_schema};
pub use error::{FormError, Result};
pub use field::{
    FieldDefinition, FormField, RawFieldDefinition, definition_schema, prepare_fields,
    prepare_raw_fields,
};
pub use rule::Rule;
pub use store::{Fields, FormFieldStore, FormValidation, SubscriptionId};
pub use validator::Validator;
pub use value::{FieldValue, empty_value};
