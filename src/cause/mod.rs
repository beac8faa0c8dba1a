//! Causes
//!
//! The cause stack records why an action is happening, newest entry first.
//! Event consumers receive a [`Cause`]: an immutable composite of the cause
//! chain and the context that applied when it was taken.

mod stack;

pub use stack::CauseStack;

use crate::context::EventContext;
use crate::payload::CauseEntry;
use std::any::Any;
use std::sync::Arc;

#[derive(Debug)]
struct CauseInner {
    context: EventContext,
    // Newest first; never empty.
    entries: Vec<CauseEntry>,
}

/// Immutable cause chain plus its event context.
///
/// A cause always has at least one entry. Clones share one allocation.
#[derive(Debug, Clone)]
pub struct Cause {
    inner: Arc<CauseInner>,
}

impl Cause {
    /// Cause with a single entry.
    pub fn of(context: EventContext, root: CauseEntry) -> Self {
        Self {
            inner: Arc::new(CauseInner {
                context,
                entries: vec![root],
            }),
        }
    }

    /// Cause from entries ordered newest first. `None` if `entries` is empty.
    pub fn from_entries(context: EventContext, entries: Vec<CauseEntry>) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        Some(Self {
            inner: Arc::new(CauseInner { context, entries }),
        })
    }

    pub fn context(&self) -> &EventContext {
        &self.inner.context
    }

    /// The most recent entry: the direct cause of the action.
    pub fn root(&self) -> &CauseEntry {
        &self.inner.entries[0]
    }

    /// Newest entry whose payload is a `T`.
    pub fn first<T: Any>(&self) -> Option<&T> {
        self.inner.entries.iter().find_map(|e| e.downcast_ref::<T>())
    }

    /// Oldest entry whose payload is a `T`.
    pub fn last<T: Any>(&self) -> Option<&T> {
        self.inner
            .entries
            .iter()
            .rev()
            .find_map(|e| e.downcast_ref::<T>())
    }

    /// Every payload of type `T`, newest first.
    pub fn all_of<T: Any>(&self) -> Vec<&T> {
        self.inner
            .entries
            .iter()
            .filter_map(|e| e.downcast_ref::<T>())
            .collect()
    }

    /// True if this exact entry (by identity) is part of the chain.
    pub fn contains(&self, entry: &CauseEntry) -> bool {
        self.inner.entries.iter().any(|e| e.ptr_eq(entry))
    }

    pub fn contains_type<T: Any>(&self) -> bool {
        self.inner.entries.iter().any(|e| e.is::<T>())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CauseEntry> {
        self.inner.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if both causes are the same allocation.
    pub fn ptr_eq(&self, other: &Cause) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
