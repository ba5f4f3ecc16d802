//! A slice reducer that records how it was called
//!
//! Register a [`RecordingReducer`] as a slice to check what a root reducer
//! hands each slice: how often it runs, which prior value it sees and which
//! action.

use figures_state_core::{reducer::Reducer, Action};
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

/// One call received by a [`RecordingReducer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// The slice value passed in (`None` on first use)
    pub state: Option<Value>,
    /// The action passed in
    pub action: Action,
}

/// Slice reducer over JSON values that records every call.
///
/// It returns the current value unchanged, or `default` when there is none,
/// so it behaves like a slice reducer that handles no actions.
///
/// Clones share the same call log.
#[derive(Debug, Clone)]
pub struct RecordingReducer {
    default: Value,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingReducer {
    /// Create a recorder whose default slice value is `default`
    #[must_use]
    pub fn new(default: Value) -> Self {
        Self {
            default,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls received so far
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Reducer for RecordingReducer {
    type State = Value;
    type Action = Action;

    fn reduce(&self, state: Option<&Value>, action: &Action) -> Value {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                state: state.cloned(),
                action: action.clone(),
            });
        state.cloned().unwrap_or_else(|| self.default.clone())
    }
}
