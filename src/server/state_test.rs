//! Tests for startup state

use super::*;
use std::time::Duration;

/// Test StartupState initial value
#[test]
fn test_startup_state_initially_incomplete() {
    let state = StartupState::new();
    assert!(!state.is_complete(), "Should start as incomplete");
}

/// Test the flag flips exactly once and never reverts
#[test]
fn test_startup_state_flips_once() {
    let state = StartupState::new();

    assert!(state.mark_complete(), "First mark should perform the transition");
    assert!(state.is_complete());

    assert!(!state.mark_complete(), "Second mark should be a no-op");
    for _ in 0..3 {
        assert!(state.is_complete(), "Should stay complete on repeated reads");
    }
}

/// Test StartupState clones share state
#[test]
fn test_startup_state_clones_share_state() {
    let state = StartupState::new();
    let cloned = state.clone();

    state.mark_complete();

    assert!(cloned.is_complete(), "Clone should reflect same startup state");
    assert!(!cloned.mark_complete(), "Clone should see transition already done");
}

#[tokio::test]
async fn test_run_startup_zero_delay_marks_complete() {
    let state = StartupState::new();

    run_startup(Duration::ZERO, state.clone()).await;

    assert!(state.is_complete());
}

#[tokio::test(start_paused = true)]
async fn test_run_startup_waits_for_delay() {
    let state = StartupState::new();
    let task = tokio::spawn(run_startup(Duration::from_secs(10), state.clone()));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(!state.is_complete(), "Should not complete before the delay");

    tokio::time::sleep(Duration::from_secs(6)).await;
    task.await.expect("startup task should not panic");
    assert!(state.is_complete(), "Should complete after the delay");
}
