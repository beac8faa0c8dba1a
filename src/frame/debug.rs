//! Frame open-site capture and corruption diagnostics.
//!
//! Backtraces are only captured when debug frames are enabled, and only read
//! when out-of-order closure has to be reported.

use super::Frame;
use std::backtrace::Backtrace;
use std::fmt;
use tracing::warn;

/// Where a frame was opened.
pub(crate) struct OpenSite {
    backtrace: Backtrace,
}

impl OpenSite {
    pub(crate) fn capture() -> Self {
        Self {
            backtrace: Backtrace::force_capture(),
        }
    }
}

impl fmt::Debug for OpenSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenSite").finish_non_exhaustive()
    }
}

impl fmt::Display for OpenSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.backtrace)
    }
}

/// Report that `target` is being closed while `forced` frames (outermost
/// first) are still open above it.
pub(crate) fn warn_forced_closure(target: &Frame, forced: &[Frame], debug_frames: bool) {
    warn!(
        frame = %target.id(),
        opened_at = %target.opened_at(),
        forced = forced.len(),
        "Cause stack frame corruption! Found {} frames left on the stack above the frame being closed. Clearing them all.",
        forced.len()
    );

    if !debug_frames {
        warn!("Set debug_frames = true (or CAUSESTACK_DEBUG_FRAMES=true) to capture where frames are opened.");
        return;
    }

    if let Some(site) = target.open_site() {
        warn!(frame = %target.id(), "Attempted to pop frame opened at:\n{}", site);
    }
    for (position, frame) in forced.iter().enumerate().rev() {
        match frame.open_site() {
            Some(site) => warn!(
                frame = %frame.id(),
                position = position + 1,
                "Force-closing frame opened at:\n{}",
                site
            ),
            None => warn!(
                frame = %frame.id(),
                position = position + 1,
                opened_at = %frame.opened_at(),
                "Force-closing frame (no open-site capture)"
            ),
        }
    }
}
