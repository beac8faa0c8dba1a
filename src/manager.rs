//! Cause Stack Manager
//!
//! Coordinates the cause stack, the context map and the frame stack for one
//! logical unit of work. Frames give scopes exact cleanup: closing a frame
//! drops the causes it left behind and undoes its context changes. Frames
//! closed out of order are repaired, innermost first, and reported.

use crate::cause::{Cause, CauseStack};
use crate::config::CauseStackConfig;
use crate::context::{ContextKey, ContextMap, EventContext};
use crate::error::StackError;
use crate::frame::{debug, Frame, FrameHandle};
use crate::payload::{CauseEntry, ContextValue};
use crate::scope::CauseScope;
use std::any::Any;
use std::cell::OnceCell;
use std::panic::Location;
use tracing::trace;

/// Cause and context tracking for one execution context.
///
/// Not synchronized: give each thread or task its own manager rather than
/// sharing one behind a lock.
#[derive(Debug)]
pub struct CauseStackManager {
    causes: CauseStack,
    frames: Vec<Frame>,
    context: ContextMap,
    /// Reported as the cause when nothing has been pushed.
    root: CauseEntry,
    debug_frames: bool,
    cached_cause: OnceCell<Cause>,
    cached_context: OnceCell<EventContext>,
}

impl CauseStackManager {
    /// Create a manager whose fallback cause is `root` (usually the host
    /// server or game object).
    pub fn new(root: CauseEntry) -> Self {
        Self {
            causes: CauseStack::new(),
            frames: Vec::new(),
            context: ContextMap::new(),
            root,
            debug_frames: false,
            cached_cause: OnceCell::new(),
            cached_context: OnceCell::new(),
        }
    }

    pub fn with_config(root: CauseEntry, config: &CauseStackConfig) -> Self {
        Self::new(root).with_debug_frames(config.debug_frames)
    }

    /// Capture a backtrace for every frame opened from now on.
    pub fn with_debug_frames(mut self, enabled: bool) -> Self {
        self.debug_frames = enabled;
        self
    }

    /// The current cause chain, newest first, with the current context.
    ///
    /// Falls back to the root entry when the stack is empty, so there is
    /// always a cause. The result is cached until the next mutation.
    pub fn current_cause(&self) -> Cause {
        self.cached_cause
            .get_or_init(|| {
                let context = self.current_context();
                let entries: Vec<CauseEntry> = self.causes.iter().cloned().collect();
                Cause::from_entries(context.clone(), entries)
                    .unwrap_or_else(|| Cause::of(context, self.root.clone()))
            })
            .clone()
    }

    /// Snapshot of the context map, cached until the next context mutation.
    pub fn current_context(&self) -> EventContext {
        self.cached_context
            .get_or_init(|| self.context.snapshot())
            .clone()
    }

    pub fn push_cause(&mut self, entry: CauseEntry) -> &mut Self {
        self.causes.push(entry);
        self.cached_cause.take();
        self
    }

    /// Pop the newest cause pushed since the current frame opened.
    pub fn pop_cause(&mut self) -> Result<CauseEntry, StackError> {
        let entry = self.causes.pop()?;
        self.cached_cause.take();
        Ok(entry)
    }

    /// Pop `n` causes. The first failure is returned; earlier pops stay applied.
    pub fn pop_causes(&mut self, n: usize) -> Result<(), StackError> {
        for _ in 0..n {
            self.pop_cause()?;
        }
        Ok(())
    }

    pub fn peek_cause(&self) -> Option<&CauseEntry> {
        self.causes.peek()
    }

    /// Open a frame. Causes already on the stack become protected until the
    /// frame closes.
    #[track_caller]
    pub fn push_frame(&mut self) -> FrameHandle {
        let prior_min_depth = self.causes.raise_floor();
        let frame = Frame::new(prior_min_depth, Location::caller(), self.debug_frames);
        let handle = frame.handle();
        trace!(
            frame = %frame.id(),
            depth = self.causes.len(),
            "Pushed cause frame"
        );
        self.frames.push(frame);
        handle
    }

    /// Close a frame, restoring the cause stack and context to their state
    /// when it was opened.
    ///
    /// If frames opened later are still open they are force-closed first,
    /// innermost first, with a warning. A frame that is not on the stack at
    /// all is an error and nothing is changed.
    pub fn pop_frame(&mut self, handle: FrameHandle) -> Result<(), StackError> {
        let position = self
            .frames
            .iter()
            .rposition(|frame| frame.id() == handle.id())
            .ok_or(StackError::FrameNotOnStack { frame: handle.id() })?;

        if position + 1 < self.frames.len() {
            debug::warn_forced_closure(
                &self.frames[position],
                &self.frames[position + 1..],
                self.debug_frames,
            );
            while self.frames.len() > position + 1 {
                self.close_top_frame();
            }
        }
        self.close_top_frame();
        Ok(())
    }

    fn close_top_frame(&mut self) {
        let Some(mut frame) = self.frames.pop() else {
            return;
        };
        if frame.restore_context(&mut self.context) {
            self.invalidate_context();
        }
        let discarded = self.causes.lower_floor(frame.prior_min_depth());
        if discarded > 0 {
            self.cached_cause.take();
        }
        trace!(
            frame = %frame.id(),
            discarded,
            depth = self.causes.len(),
            "Popped cause frame"
        );
    }

    /// Open a frame that closes itself when the returned guard is dropped.
    #[track_caller]
    pub fn create_scope(&mut self) -> CauseScope<'_> {
        let handle = self.push_frame();
        CauseScope::new(self, handle)
    }

    /// Run `f` inside a fresh scope.
    #[track_caller]
    pub fn with_scope<R>(&mut self, f: impl FnOnce(&mut CauseScope<'_>) -> R) -> R {
        let mut scope = self.create_scope();
        f(&mut scope)
    }

    /// Set a context value. Inside a frame, the key's previous state is
    /// remembered so the frame can restore it on close.
    pub fn add_context(&mut self, key: impl Into<ContextKey>, value: ContextValue) -> &mut Self {
        let key = key.into();
        self.invalidate_context();
        let previous = self.context.put(key.clone(), value);
        if let Some(frame) = self.frames.last_mut() {
            frame.record_put(&key, previous);
        }
        self
    }

    pub fn get_context(&self, key: &ContextKey) -> Option<&ContextValue> {
        self.context.get(key)
    }

    /// Get a context value only if it is a `T`.
    pub fn get_context_typed<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.context.get_typed::<T>(key)
    }

    /// Remove a context value, returning it.
    pub fn clear_context(&mut self, key: &ContextKey) -> Option<ContextValue> {
        let removed = self.context.remove(key)?;
        self.invalidate_context();
        if let Some(frame) = self.frames.last_mut() {
            frame.record_remove(key, removed.clone());
        }
        Some(removed)
    }

    // The cause snapshot embeds the context snapshot.
    fn invalidate_context(&mut self) {
        self.cached_context.take();
        self.cached_cause.take();
    }

    pub fn root(&self) -> &CauseEntry {
        &self.root
    }

    pub fn cause_depth(&self) -> usize {
        self.causes.len()
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Depth the cause stack cannot be popped below until the current frame closes.
    pub fn min_depth(&self) -> usize {
        self.causes.floor()
    }

    pub fn debug_frames(&self) -> bool {
        self.debug_frames
    }
}
