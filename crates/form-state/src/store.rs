use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::FormConfig;
use crate::error::Result;
use crate::field::{FieldDefinition, FormField, prepare_fields, raw_definitions};
use crate::value::FieldValue;

/// Read-only snapshot of a store's field collection.
///
/// Every published change yields a new snapshot, so hosts can detect
/// changes with [`Fields::same_as`] instead of comparing contents.
#[derive(Debug, Clone)]
pub struct Fields(Arc<[FormField]>);

impl Fields {
    fn new(fields: Vec<FormField>) -> Self {
        Fields(fields.into())
    }

    pub fn same_as(&self, other: &Fields) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn get(&self, name: &str) -> Option<&FormField> {
        self.0.iter().find(|field| field.name() == name)
    }
}

impl Deref for Fields {
    type Target = [FormField];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

/// Handle returned by [`FormFieldStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Fields)>;

/// Outcome of checking every field at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub valid: bool,
    pub invalid: Vec<String>,
}

/// In-memory store of named form fields owned by a single host component.
///
/// Lookups resolve to the first field with a matching name. Unknown names
/// never raise errors: reads yield `None`, writes are ignored and
/// validation reports `false`.
pub struct FormFieldStore {
    fields: Fields,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    resynced: bool,
}

impl FormFieldStore {
    pub fn new(definitions: Vec<FieldDefinition>) -> Self {
        let fields = prepare_fields(&definitions);
        debug!(fields = fields.len(), "form store created");
        Self {
            fields: Fields::new(fields),
            listeners: Vec::new(),
            next_subscription: 0,
            resynced: false,
        }
    }

    /// Builds a store from untyped definition objects.
    pub fn from_raw(entries: &[Value]) -> Result<Self> {
        Ok(Self::new(raw_definitions(entries)?))
    }

    pub fn from_config(config: &FormConfig) -> Result<Self> {
        Ok(Self::new(config.definitions()?))
    }

    pub fn from_json_str(config_json: &str) -> Result<Self> {
        Self::from_config(&FormConfig::from_json_str(config_json)?)
    }

    /// Current snapshot. Cheap to clone and hold on to.
    pub fn fields(&self) -> Fields {
        self.fields.clone()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FormField::name)
    }

    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.get(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(FormField::value)
    }

    /// Replaces the value of `name` and notifies subscribers.
    ///
    /// The collection is copied and the record swapped out whole; snapshots
    /// taken earlier keep their old contents.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        let Some(index) = self.find_index(name) else {
            debug!(field = name, "ignoring update for unknown field");
            return;
        };
        let mut next = self.fields.to_vec();
        next[index] = next[index].with_value(value.into());
        trace!(field = name, index, "field updated");
        self.publish(next);
    }

    pub fn validate(&self, name: &str) -> bool {
        let Some(field) = self.field(name) else {
            trace!(field = name, "validating unknown field");
            return false;
        };
        if field.validator().is_none() {
            debug!(field = name, "field has no validator; treating as invalid");
        }
        field.is_valid()
    }

    /// Validates every field in order. An empty form is valid.
    pub fn validate_all(&self) -> FormValidation {
        let invalid: Vec<String> = self
            .fields
            .iter()
            .filter(|field| {
                if field.validator().is_none() {
                    debug!(field = field.name(), "field has no validator; treating as invalid");
                }
                !field.is_valid()
            })
            .map(|field| field.name().to_string())
            .collect();
        FormValidation {
            valid: invalid.is_empty(),
            invalid,
        }
    }

    /// Second initialization phase: re-derives every value from its default.
    ///
    /// Only the first call does anything; it returns `true` in that case.
    /// Subscribers hear about it only when some record actually changed.
    pub fn resync(&mut self) -> bool {
        if !self.begin_resync() {
            return false;
        }
        let next = self.fields.iter().map(FormField::reset).collect();
        self.publish_if_changed(next);
        true
    }

    /// Like [`resync`](Self::resync), but first adopts defaults and
    /// validators from definitions that were not available at construction
    /// time, such as defaults loaded later.
    ///
    /// Each existing field takes its settings from the first definition with
    /// the same name. Fields without a matching definition are only reset,
    /// and definitions naming unknown fields are ignored. Names and order
    /// never change.
    pub fn resync_with(&mut self, definitions: &[FieldDefinition]) -> bool {
        if !self.begin_resync() {
            return false;
        }
        let next = self
            .fields
            .iter()
            .map(|field| {
                match definitions
                    .iter()
                    .find(|definition| definition.name == field.name())
                {
                    Some(definition) => field.settle(definition),
                    None => field.reset(),
                }
            })
            .collect();
        self.publish_if_changed(next);
        true
    }

    pub fn is_resynced(&self) -> bool {
        self.resynced
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Fields) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn begin_resync(&mut self) -> bool {
        if self.resynced {
            trace!("resync already done");
            return false;
        }
        self.resynced = true;
        true
    }

    fn publish_if_changed(&mut self, next: Vec<FormField>) {
        let changed = next
            .iter()
            .zip(self.fields.iter())
            .any(|(new, old)| !new.same_record(old));
        debug!(changed, "form store resynced");
        if changed {
            self.publish(next);
        }
    }

    fn publish(&mut self, next: Vec<FormField>) {
        self.fields = Fields::new(next);
        for (_, listener) in &mut self.listeners {
            listener(&self.fields);
        }
    }
}

impl fmt::Debug for FormFieldStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormFieldStore")
            .field("fields", &self.fields)
            .field("listeners", &self.listeners.len())
            .field("resynced", &self.resynced)
            .finish()
    }
}
