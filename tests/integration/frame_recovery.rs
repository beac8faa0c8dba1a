//! Out-of-order frame closure: repair order and diagnostics.

use super::test_utils::{manager, with_captured_logs, Server};
use causestack::{CauseEntry, CauseStackManager, ContextKey, ContextValue, StackError};

const K: ContextKey = ContextKey::from_static("test:k");

#[test]
fn test_closing_outer_frame_force_closes_inner() {
    let mut mgr = manager();
    let base = CauseEntry::new("base");
    mgr.push_cause(base.clone());

    let a = mgr.push_frame();
    let a_prior = 0;
    mgr.push_cause(CauseEntry::new("a"));
    let _b = mgr.push_frame();
    mgr.push_cause(CauseEntry::new("b"));

    let (result, logs) = with_captured_logs(|| mgr.pop_frame(a));
    result.unwrap();

    assert_eq!(mgr.frame_depth(), 0);
    assert_eq!(mgr.min_depth(), a_prior);
    assert_eq!(mgr.cause_depth(), 1);
    assert_eq!(mgr.peek_cause(), Some(&base));
    assert!(logs.contains("Cause stack frame corruption"), "logs: {logs}");
    assert!(logs.contains("forced=1"), "logs: {logs}");
    assert!(logs.contains("CAUSESTACK_DEBUG_FRAMES"), "logs: {logs}");
}

#[test]
fn test_recovery_restores_innermost_first_for_overwrites() {
    let mut mgr = manager();
    mgr.add_context(K, ContextValue::new("v0"));

    let a = mgr.push_frame();
    mgr.add_context(K, ContextValue::new("vA"));
    let _b = mgr.push_frame();
    mgr.add_context(K, ContextValue::new("vB"));

    let (result, _) = with_captured_logs(|| mgr.pop_frame(a));
    result.unwrap();

    assert_eq!(mgr.get_context_typed::<&str>(&K), Some(&"v0"));
}

#[test]
fn test_recovery_restores_innermost_first_for_introduced_keys() {
    let mut mgr = manager();

    let a = mgr.push_frame();
    mgr.add_context(K, ContextValue::new("vA"));
    let _b = mgr.push_frame();
    mgr.add_context(K, ContextValue::new("vB"));

    let (result, _) = with_captured_logs(|| mgr.pop_frame(a));
    result.unwrap();

    assert!(mgr.get_context(&K).is_none());
}

#[test]
fn test_recovery_from_middle_of_stack() {
    let mut mgr = manager();
    let outer = mgr.push_frame();
    mgr.push_cause(CauseEntry::new("outer"));
    let middle = mgr.push_frame();
    mgr.push_cause(CauseEntry::new("middle"));
    let _inner1 = mgr.push_frame();
    let _inner2 = mgr.push_frame();
    mgr.push_cause(CauseEntry::new("inner"));

    let (result, logs) = with_captured_logs(|| mgr.pop_frame(middle));
    result.unwrap();

    assert!(logs.contains("forced=2"), "logs: {logs}");
    assert_eq!(mgr.frame_depth(), 1);
    assert_eq!(mgr.cause_depth(), 1);
    assert_eq!(mgr.min_depth(), 0);

    mgr.pop_frame(outer).unwrap();
    assert_eq!(mgr.cause_depth(), 0);
}

#[test]
fn test_debug_frames_logs_open_sites() {
    let mut mgr = CauseStackManager::new(CauseEntry::new(Server)).with_debug_frames(true);
    let a = mgr.push_frame();
    let _b = mgr.push_frame();

    let (result, logs) = with_captured_logs(|| mgr.pop_frame(a));
    result.unwrap();

    assert!(logs.contains("Attempted to pop frame opened at"), "logs: {logs}");
    assert!(logs.contains("Force-closing frame opened at"), "logs: {logs}");
    assert!(!logs.contains("CAUSESTACK_DEBUG_FRAMES"), "logs: {logs}");
}

#[test]
fn test_in_order_close_is_silent() {
    let mut mgr = manager();
    let a = mgr.push_frame();
    let b = mgr.push_frame();

    let (_, logs) = with_captured_logs(|| {
        mgr.pop_frame(b).unwrap();
        mgr.pop_frame(a).unwrap();
    });
    assert!(logs.is_empty(), "logs: {logs}");
}

#[test]
fn test_stale_handle_after_recovery_is_rejected() {
    let mut mgr = manager();
    let a = mgr.push_frame();
    let b = mgr.push_frame();
    let (result, _) = with_captured_logs(|| mgr.pop_frame(a));
    result.unwrap();

    mgr.push_cause(CauseEntry::new("after"));
    assert_eq!(
        mgr.pop_frame(b),
        Err(StackError::FrameNotOnStack { frame: b.id() })
    );
    assert_eq!(mgr.cause_depth(), 1);
}

#[test]
fn test_leaked_inner_scope_cleaned_by_outer_scope() {
    let mut mgr = manager();
    let (_, logs) = with_captured_logs(|| {
        let mut scope = mgr.create_scope();
        scope.push_frame();
        scope.push_cause(CauseEntry::new("leaked"));
        scope.add_context(K, ContextValue::new("leaked"));
    });
    assert!(logs.contains("forced=1"), "logs: {logs}");
    assert_eq!(mgr.frame_depth(), 0);
    assert_eq!(mgr.cause_depth(), 0);
    assert!(mgr.get_context(&K).is_none());
}
