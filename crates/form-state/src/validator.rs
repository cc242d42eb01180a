use std::fmt;
use std::sync::Arc;

use crate::value::FieldValue;

type Predicate = dyn Fn(&FieldValue) -> bool + Send + Sync;

/// Predicate deciding whether a field value is acceptable.
///
/// Clones share the same closure.
#[derive(Clone)]
pub struct Validator {
    predicate: Arc<Predicate>,
}

impl Validator {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Applies the predicate to `value`.
    pub fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }

    /// True when both handles point at the same closure.
    pub fn same_as(&self, other: &Validator) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

impl<F> From<F> for Validator
where
    F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
{
    fn from(predicate: F) -> Self {
        Validator::new(predicate)
    }
}
