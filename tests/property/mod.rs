//! Property-based tests for stack discipline guarantees
