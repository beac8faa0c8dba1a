//! Scoped frames.
//!
//! [`CauseScope`] pops its frame when dropped, so a scope cleans up on normal
//! return, early return through `?`, and unwinding alike.

use crate::error::StackError;
use crate::frame::FrameHandle;
use crate::manager::CauseStackManager;
use std::ops::{Deref, DerefMut};
use tracing::error;

/// Guard for a frame opened by [`CauseStackManager::create_scope`].
///
/// Derefs to the manager, so causes and context pushed through the guard land
/// inside the frame. Nested scopes are opened from the guard.
#[must_use = "the frame closes as soon as the scope is dropped"]
pub struct CauseScope<'a> {
    manager: &'a mut CauseStackManager,
    handle: FrameHandle,
    closed: bool,
}

impl<'a> CauseScope<'a> {
    pub(crate) fn new(manager: &'a mut CauseStackManager, handle: FrameHandle) -> Self {
        Self {
            manager,
            handle,
            closed: false,
        }
    }

    pub fn handle(&self) -> FrameHandle {
        self.handle
    }

    /// Close the frame now and report a protocol error instead of logging it.
    pub fn close(mut self) -> Result<(), StackError> {
        self.closed = true;
        self.manager.pop_frame(self.handle)
    }
}

impl Deref for CauseScope<'_> {
    type Target = CauseStackManager;

    fn deref(&self) -> &CauseStackManager {
        self.manager
    }
}

impl DerefMut for CauseScope<'_> {
    fn deref_mut(&mut self) -> &mut CauseStackManager {
        self.manager
    }
}

impl Drop for CauseScope<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.manager.pop_frame(self.handle) {
            error!(frame = %self.handle.id(), error = %err, "Failed to close cause scope");
        }
    }
}
