//! Integration tests for Store action broadcasting.
//!
//! Exercises the request-response bridge HTTP handlers rely on: send a
//! command action, wait for the terminal action the effect pipeline
//! produces.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::time::Duration;
use wayfare_core::{Effect, Reducer, SmallVec, smallvec};
use wayfare_runtime::{Store, StoreError};

// ============================================================================
// Test Fixtures
// ============================================================================

/// A miniature booking pipeline: Submit kicks off a remote write, which
/// resolves to Stored or StoreFailed. Mirrors the shape of the real
/// booking-desk reducer without the platform client.
#[derive(Debug, Clone, PartialEq)]
enum PipelineAction {
    Submit { request_id: u64, fail: bool },
    Stored { request_id: u64 },
    StoreFailed { request_id: u64, error: String },
    Refresh,
    Refreshed { count: u32 },
}

#[derive(Debug, Clone, Default)]
struct PipelineState {
    stored: Vec<u64>,
    refreshes: u32,
}

#[derive(Clone)]
struct PipelineEnvironment;

#[derive(Clone)]
struct PipelineReducer;

impl Reducer for PipelineReducer {
    type State = PipelineState;
    type Action = PipelineAction;
    type Environment = PipelineEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PipelineAction::Submit { request_id, fail } => {
                smallvec![Effect::Future(Box::pin(async move {
                    // Simulate the remote insert
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    if fail {
                        Some(PipelineAction::StoreFailed {
                            request_id,
                            error: "store rejected the row".to_string(),
                        })
                    } else {
                        Some(PipelineAction::Stored { request_id })
                    }
                }))]
            },

            PipelineAction::Stored { request_id } => {
                state.stored.push(request_id);
                smallvec![Effect::None]
            },

            PipelineAction::StoreFailed { .. } => smallvec![Effect::None],

            PipelineAction::Refresh => {
                state.refreshes += 1;
                let count = state.refreshes;
                smallvec![Effect::Future(Box::pin(async move {
                    Some(PipelineAction::Refreshed { count })
                }))]
            },

            PipelineAction::Refreshed { .. } => smallvec![Effect::None],
        }
    }
}

fn pipeline_store() -> Store<PipelineState, PipelineAction, PipelineEnvironment, PipelineReducer> {
    Store::new(PipelineState::default(), PipelineReducer, PipelineEnvironment)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn send_and_wait_for_returns_terminal_action() {
    let store = pipeline_store();

    let result = store
        .send_and_wait_for(
            PipelineAction::Submit {
                request_id: 7,
                fail: false,
            },
            |action| {
                matches!(
                    action,
                    PipelineAction::Stored { request_id: 7 }
                        | PipelineAction::StoreFailed { request_id: 7, .. }
                )
            },
            Duration::from_secs(1),
        )
        .await;

    assert_eq!(result.unwrap(), PipelineAction::Stored { request_id: 7 });

    let stored = store.state(|s| s.stored.clone()).await;
    assert_eq!(stored, vec![7]);
}

#[tokio::test]
async fn send_and_wait_for_surfaces_failure_action() {
    let store = pipeline_store();

    let result = store
        .send_and_wait_for(
            PipelineAction::Submit {
                request_id: 8,
                fail: true,
            },
            |action| {
                matches!(
                    action,
                    PipelineAction::Stored { request_id: 8 }
                        | PipelineAction::StoreFailed { request_id: 8, .. }
                )
            },
            Duration::from_secs(1),
        )
        .await;

    assert!(matches!(
        result.unwrap(),
        PipelineAction::StoreFailed { request_id: 8, .. }
    ));

    // The failed request never lands in state
    let stored = store.state(|s| s.stored.clone()).await;
    assert!(stored.is_empty());
}

#[tokio::test]
async fn send_and_wait_for_times_out_without_match() {
    let store = pipeline_store();

    let result = store
        .send_and_wait_for(
            PipelineAction::Submit {
                request_id: 9,
                fail: false,
            },
            // Wait for an action that will never come
            |action| matches!(action, PipelineAction::StoreFailed { request_id: 9, .. }),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result.unwrap_err(), StoreError::Timeout));
}

#[tokio::test]
async fn concurrent_waiters_each_get_their_action() {
    let store = Arc::new(pipeline_store());

    let mut handles = vec![];
    for request_id in 1..=5u64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    PipelineAction::Submit {
                        request_id,
                        fail: false,
                    },
                    move |action| {
                        matches!(action, PipelineAction::Stored { request_id: id } if *id == request_id)
                    },
                    Duration::from_secs(1),
                )
                .await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let mut stored = store.state(|s| s.stored.clone()).await;
    stored.sort_unstable();
    assert_eq!(stored, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn subscribe_actions_observes_effect_output() {
    let store = pipeline_store();

    let mut rx = store.subscribe_actions();

    let mut handle = store.send(PipelineAction::Refresh).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .expect("effects should finish");

    // Only effect-produced actions are broadcast, not the initial send
    let observed = rx.recv().await.unwrap();
    assert_eq!(observed, PipelineAction::Refreshed { count: 1 });
}

#[tokio::test]
async fn shutdown_rejects_new_actions() {
    let store = pipeline_store();

    store
        .shutdown(Duration::from_secs(1))
        .await
        .expect("no pending effects");

    let result = store.send(PipelineAction::Refresh).await;
    assert!(matches!(
        result.unwrap_err(),
        StoreError::ShutdownInProgress
    ));
}
