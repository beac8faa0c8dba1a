//! Immutable context snapshots handed to event consumers.

use super::ContextKey;
use crate::payload::ContextValue;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A frozen view of the context table.
///
/// Cloning is cheap; clones share the same allocation, which [`ptr_eq`]
/// exposes so callers can tell a cached snapshot from a rebuilt one.
///
/// [`ptr_eq`]: EventContext::ptr_eq
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    entries: Arc<HashMap<ContextKey, ContextValue>>,
}

impl EventContext {
    pub(crate) fn from_entries(entries: HashMap<ContextKey, ContextValue>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ContextKey) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    pub fn get_typed<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.entries.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    pub fn contains_key(&self, key: &ContextKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ContextKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ContextKey, &ContextValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if both snapshots are the same allocation.
    pub fn ptr_eq(&self, other: &EventContext) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

/// Content equality: same keys mapped to identical payloads.
impl PartialEq for EventContext {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.entries == other.entries
    }
}

impl Eq for EventContext {}
