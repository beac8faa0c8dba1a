//! LIFO stack of cause entries with a protected floor.

use crate::error::StackError;
use crate::payload::CauseEntry;

/// Cause entries ordered oldest to newest.
///
/// `floor` is the depth the stack may not shrink below through [`pop`]. Frames
/// raise it when they open so a scope can only remove what it pushed itself.
///
/// [`pop`]: CauseStack::pop
#[derive(Debug, Default)]
pub struct CauseStack {
    entries: Vec<CauseEntry>,
    floor: usize,
}

impl CauseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: CauseEntry) {
        self.entries.push(entry);
    }

    /// Remove the newest entry owned by the current scope.
    pub fn pop(&mut self) -> Result<CauseEntry, StackError> {
        if self.entries.len() > self.floor {
            if let Some(entry) = self.entries.pop() {
                return Ok(entry);
            }
        }
        Err(StackError::CauseUnderflow {
            depth: self.entries.len(),
            floor: self.floor,
        })
    }

    /// Pop `n` entries in sequence. Stops at the first failure; entries
    /// already popped stay popped.
    pub fn pop_many(&mut self, n: usize) -> Result<(), StackError> {
        for _ in 0..n {
            self.pop()?;
        }
        Ok(())
    }

    pub fn peek(&self) -> Option<&CauseEntry> {
        self.entries.last()
    }

    /// Protect everything currently on the stack. Returns the previous floor.
    pub fn raise_floor(&mut self) -> usize {
        std::mem::replace(&mut self.floor, self.entries.len())
    }

    /// Discard entries pushed above the current floor, then restore an
    /// earlier floor.
    ///
    /// Entries between `prior` and the current floor belong to enclosing
    /// scopes and survive. Returns how many entries were discarded.
    pub fn lower_floor(&mut self, prior: usize) -> usize {
        debug_assert!(prior <= self.floor, "floor can only move down on frame close");
        let excess = self.entries.len().saturating_sub(self.floor);
        self.entries.truncate(self.floor);
        self.floor = prior;
        excess
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries newest first.
    pub fn iter(&self) -> impl Iterator<Item = &CauseEntry> {
        self.entries.iter().rev()
    }
}
