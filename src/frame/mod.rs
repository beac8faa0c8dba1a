//! Cause Frames
//!
//! A frame is a checkpoint opened by a scope. It remembers the cause-stack
//! floor of the enclosing scope and, lazily, enough about the context keys it
//! touched to put them back when it closes.

pub(crate) mod debug;

use crate::context::{ContextKey, ContextMap};
use crate::payload::ContextValue;
use debug::OpenSite;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU64, Ordering};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique frame identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

impl FrameId {
    fn next() -> Self {
        FrameId(FRAME_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// Token returned by `push_frame` and consumed by `pop_frame`.
///
/// Handles are plain identifiers. Closing a handle twice, or one from another
/// manager, finds nothing on the frame stack and is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle {
    id: FrameId,
}

impl FrameHandle {
    pub fn id(&self) -> FrameId {
        self.id
    }
}

/// Bookkeeping for one open frame.
#[derive(Debug)]
pub(crate) struct Frame {
    id: FrameId,
    prior_min_depth: usize,
    // Lazily allocated: most frames never touch the context.
    restore_values: Option<HashMap<ContextKey, ContextValue>>,
    introduced_keys: Option<HashSet<ContextKey>>,
    opened_at: &'static Location<'static>,
    open_site: Option<OpenSite>,
}

impl Frame {
    pub(crate) fn new(
        prior_min_depth: usize,
        opened_at: &'static Location<'static>,
        capture_open_site: bool,
    ) -> Self {
        Self {
            id: FrameId::next(),
            prior_min_depth,
            restore_values: None,
            introduced_keys: None,
            opened_at,
            open_site: capture_open_site.then(OpenSite::capture),
        }
    }

    pub(crate) fn id(&self) -> FrameId {
        self.id
    }

    pub(crate) fn handle(&self) -> FrameHandle {
        FrameHandle { id: self.id }
    }

    pub(crate) fn prior_min_depth(&self) -> usize {
        self.prior_min_depth
    }

    pub(crate) fn opened_at(&self) -> &'static Location<'static> {
        self.opened_at
    }

    pub(crate) fn open_site(&self) -> Option<&OpenSite> {
        self.open_site.as_ref()
    }

    fn is_introduced(&self, key: &ContextKey) -> bool {
        self.introduced_keys
            .as_ref()
            .is_some_and(|keys| keys.contains(key))
    }

    fn is_stored(&self, key: &ContextKey) -> bool {
        self.restore_values
            .as_ref()
            .is_some_and(|values| values.contains_key(key))
    }

    fn introduce(&mut self, key: &ContextKey) {
        self.introduced_keys
            .get_or_insert_with(HashSet::new)
            .insert(key.clone());
    }

    fn store(&mut self, key: &ContextKey, prior: ContextValue) {
        self.restore_values
            .get_or_insert_with(HashMap::new)
            .insert(key.clone(), prior);
    }

    /// Record provenance for a put of `key` that replaced `previous`.
    ///
    /// Only the first change to a key within the frame is recorded, so the
    /// frame always restores the value it found on entry.
    pub(crate) fn record_put(&mut self, key: &ContextKey, previous: Option<ContextValue>) {
        if self.is_introduced(key) || self.is_stored(key) {
            return;
        }
        match previous {
            None => self.introduce(key),
            Some(prior) => self.store(key, prior),
        }
    }

    /// Record provenance for the removal of `key`, which held `removed`.
    pub(crate) fn record_remove(&mut self, key: &ContextKey, removed: ContextValue) {
        if self.is_introduced(key) || self.is_stored(key) {
            return;
        }
        self.store(key, removed);
    }

    /// Undo this frame's context changes. Returns true if the map was touched.
    pub(crate) fn restore_context(&mut self, context: &mut ContextMap) -> bool {
        let mut touched = false;
        if let Some(keys) = self.introduced_keys.take() {
            for key in &keys {
                context.remove(key);
            }
            touched |= !keys.is_empty();
        }
        if let Some(values) = self.restore_values.take() {
            touched |= !values.is_empty();
            for (key, value) in values {
                context.put(key, value);
            }
        }
        touched
    }
}
