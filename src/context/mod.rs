//! Event Context
//!
//! Situational facts that apply to the current action, indexed by key. The
//! live table is a [`ContextMap`]; readers receive [`EventContext`] snapshots
//! that never change after they are taken.

pub mod keys;
mod snapshot;

pub use snapshot::EventContext;

use crate::payload::ContextValue;
use std::any::Any;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a context entry.
///
/// Keys are plain strings and must be unique process-wide; namespacing them
/// (`"plugin:owner"`) is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextKey(Cow<'static, str>);

impl ContextKey {
    /// Key backed by a static string; usable in `const` items.
    pub const fn from_static(id: &'static str) -> Self {
        ContextKey(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        ContextKey(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ContextKey {
    fn from(id: &'static str) -> Self {
        ContextKey::from_static(id)
    }
}

impl From<String> for ContextKey {
    fn from(id: String) -> Self {
        ContextKey::new(id)
    }
}

/// The live key to value table.
///
/// Frame provenance is not tracked here; the manager decides what a frame has
/// to remember before it mutates the map.
#[derive(Debug, Default)]
pub struct ContextMap {
    entries: HashMap<ContextKey, ContextValue>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &ContextKey) -> Option<&ContextValue> {
        self.entries.get(key)
    }

    /// Get a value only if it has the expected type.
    ///
    /// A value of another type yields `None` rather than an error.
    pub fn get_typed<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.entries.get(key).and_then(|value| value.downcast_ref::<T>())
    }

    /// Insert a value, returning the one it replaced.
    pub fn put(&mut self, key: ContextKey, value: ContextValue) -> Option<ContextValue> {
        self.entries.insert(key, value)
    }

    pub fn remove(&mut self, key: &ContextKey) -> Option<ContextValue> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &ContextKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Immutable copy of the current table.
    pub fn snapshot(&self) -> EventContext {
        EventContext::from_entries(self.entries.clone())
    }
}
