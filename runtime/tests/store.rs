//! Integration tests for the Store runtime
//!
//! Covers initialization, serialized dispatch, snapshots, subscriptions,
//! history and shutdown.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use figures_state_core::composition::BoxedSlice;
use figures_state_core::{combine_reducers, reducer_fn, Action, Reducer};
use figures_state_runtime::{Store, StoreConfig, StoreError};
use figures_state_testing::RecordingReducer;
use serde_json::{json, Value};
use std::sync::Arc;

// ============================================================================
// Test Fixtures
// ============================================================================

fn counter() -> impl Reducer<State = i64, Action = Action> + Send + Sync + 'static {
    reducer_fn(|state: Option<&i64>, action: &Action| {
        let count = state.copied().unwrap_or(0);
        match action.kind() {
            "INCREMENT" => count + 1,
            "ADD" => count + action.payload().as_i64().unwrap_or(0),
            _ => count,
        }
    })
}

fn journal() -> impl Reducer<State = Vec<String>, Action = Action> + Send + Sync + 'static {
    reducer_fn(|state: Option<&Vec<String>>, action: &Action| {
        let mut entries = state.cloned().unwrap_or_default();
        entries.push(action.kind().to_string());
        entries
    })
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_initial_state_is_reducer_default() {
    let store = Store::new(counter(), StoreConfig::default());

    assert_eq!(*store.snapshot(), 0);
    assert_eq!(store.dispatched(), 0);
    assert!(store.history().is_empty());
}

#[tokio::test]
async fn test_init_runs_once_against_no_state() {
    let store = Store::new(journal(), StoreConfig::default());

    assert_eq!(
        *store.snapshot(),
        vec![figures_state_core::action::INIT.to_string()]
    );
}

#[tokio::test]
async fn test_send_installs_new_snapshot() {
    let store = Store::new(counter(), StoreConfig::default());
    let before = store.snapshot();

    let returned = store.send(Action::new("INCREMENT")).await.unwrap();

    assert_eq!(*returned, 1);
    assert!(Arc::ptr_eq(&returned, &store.snapshot()));
    assert!(!Arc::ptr_eq(&before, &returned));
    assert_eq!(*before, 0);
}

#[tokio::test]
async fn test_unhandled_action_still_yields_new_snapshot() {
    let store = Store::new(counter(), StoreConfig::default());
    let before = store.snapshot();

    let after = store.send(Action::new("NOOP")).await.unwrap();

    assert_eq!(*after, *before);
    assert!(!Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn test_state_projection() {
    let store = Store::new(counter(), StoreConfig::default());
    store
        .send(Action::from_value("ADD", json!(41)))
        .await
        .unwrap();

    let doubled = store.state(|count| count * 2);
    assert_eq!(doubled, 82);
}

#[tokio::test]
async fn test_subscribers_observe_dispatch() {
    let store = Store::new(counter(), StoreConfig::default());
    let mut updates = store.subscribe();
    assert!(!updates.has_changed().unwrap());

    store.send(Action::new("INCREMENT")).await.unwrap();

    updates.changed().await.unwrap();
    assert_eq!(**updates.borrow_and_update(), 1);
}

#[tokio::test]
async fn test_dispatch_order_preserved() {
    let store = Store::new(journal(), StoreConfig::default());

    for kind in ["FIRST", "SECOND", "THIRD"] {
        store.send(Action::new(kind)).await.unwrap();
    }

    let entries = store.snapshot();
    assert_eq!(&entries[1..], ["FIRST", "SECOND", "THIRD"]);
}

#[tokio::test]
async fn test_concurrent_sends_are_serialized() {
    let store = Store::new(counter(), StoreConfig::default());

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store.send(Action::new("INCREMENT")).await.unwrap();
            })
        })
        .collect();

    for handle in handles {
        if let Err(e) = handle.await {
            panic!("concurrent send task panicked: {e}");
        }
    }

    assert_eq!(*store.snapshot(), 50);
    assert_eq!(store.dispatched(), 50);

    let sequences: Vec<u64> = store.history().iter().map(|r| r.sequence).collect();
    assert_eq!(sequences, (1..=50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_history_is_bounded() {
    let store = Store::new(counter(), StoreConfig::default().with_history_capacity(3));

    for _ in 0..5 {
        store.send(Action::new("INCREMENT")).await.unwrap();
    }

    let history = store.history();
    assert_eq!(history.len(), 3);
    assert_eq!(
        history.iter().map(|r| r.sequence).collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
    assert!(history.iter().all(|r| r.action.is("INCREMENT")));
}

#[tokio::test]
async fn test_history_disabled() {
    let store = Store::new(counter(), StoreConfig::default().with_history_capacity(0));

    store.send(Action::new("INCREMENT")).await.unwrap();

    assert!(store.history().is_empty());
    assert_eq!(store.dispatched(), 1);
}

#[tokio::test]
async fn test_shutdown_rejects_actions() {
    let store = Store::new(counter(), StoreConfig::default());
    store.send(Action::new("INCREMENT")).await.unwrap();

    store.shutdown();

    assert!(store.is_shutting_down());
    assert_eq!(
        store.send(Action::new("INCREMENT")).await.unwrap_err(),
        StoreError::ShutdownInProgress
    );
    assert_eq!(*store.snapshot(), 1);
    assert_eq!(store.dispatched(), 1);
}

#[tokio::test]
async fn test_preloaded_state() {
    let store = Store::with_state(counter(), 41, StoreConfig::default());
    assert_eq!(*store.snapshot(), 41);

    store.send(Action::new("INCREMENT")).await.unwrap();
    assert_eq!(*store.snapshot(), 42);
}

#[tokio::test]
async fn test_combined_slices_called_once_per_dispatch() {
    let courses = RecordingReducer::new(json!([]));
    let report = RecordingReducer::new(json!({}));

    let root = combine_reducers([
        ("coursesIndex", Box::new(courses.clone()) as BoxedSlice<Action>),
        ("report", Box::new(report.clone()) as BoxedSlice<Action>),
    ])
    .unwrap();
    let store = Store::new(root, StoreConfig::default().with_name("combined"));

    store.send(Action::new("NOOP")).await.unwrap();
    store.send(Action::new("NOOP")).await.unwrap();

    // INIT plus two dispatches
    assert_eq!(courses.call_count(), 3);
    assert_eq!(report.call_count(), 3);
    assert_eq!(courses.calls()[0].state, None);
    assert_eq!(courses.calls()[1].state, Some(json!([])));

    let snapshot = store.snapshot();
    assert_eq!(
        Value::Object((*snapshot).clone()),
        json!({"coursesIndex": [], "report": {}})
    );
}
