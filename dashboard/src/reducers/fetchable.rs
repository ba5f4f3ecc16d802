//! Request/receive lifecycle shared by the dashboard's data slices.
//!
//! Every data slice moves through the same three transitions:
//!
//! | Action     | `isFetching` | `data`   | `receivedAt` | `error`  |
//! |------------|--------------|----------|--------------|----------|
//! | request    | `true`       | kept     | kept         | cleared  |
//! | receive    | `false`      | replaced | set          | cleared  |
//! | failure    | `false`      | kept     | kept         | set      |
//!
//! Anything else leaves the slice as it is.

use chrono::{DateTime, Utc};
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError, Reducer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Static description of one data slice
pub trait FetchSlice {
    /// The data the slice holds once loaded
    type Data: Clone + Default + Serialize + DeserializeOwned;

    /// Slice key in the whole state
    const KEY: &'static str;
    /// Action type starting a fetch
    const REQUEST: &'static str;
    /// Action type carrying fetched data
    const RECEIVE: &'static str;
    /// Action type reporting a failed fetch
    const FAILURE: &'static str;
}

/// State of a data slice
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fetchable<T> {
    /// A fetch is in flight
    pub is_fetching: bool,
    /// Last data received
    pub data: T,
    /// When `data` was received
    pub received_at: Option<DateTime<Utc>>,
    /// Message of the last failed fetch
    pub error: Option<String>,
}

impl<T: Default> Default for Fetchable<T> {
    fn default() -> Self {
        Self {
            is_fetching: false,
            data: T::default(),
            received_at: None,
            error: None,
        }
    }
}

impl<T> Fetchable<T> {
    /// Data has been received at least once
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.received_at.is_some()
    }
}

/// Payload of a receive action
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Received<T> {
    /// The fetched data
    pub data: T,
    /// When the response arrived
    pub received_at: DateTime<Utc>,
}

/// Payload of a failure action
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failed {
    /// What went wrong
    pub message: String,
}

/// Reducer for a data slice described by `S`
pub struct FetchReducer<S> {
    _slice: PhantomData<fn() -> S>,
}

impl<S> FetchReducer<S> {
    /// Creates a new `FetchReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _slice: PhantomData,
        }
    }
}

impl<S> Default for FetchReducer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for FetchReducer<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> Copy for FetchReducer<S> {}

impl<S: FetchSlice> fmt::Debug for FetchReducer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchReducer").field("slice", &S::KEY).finish()
    }
}

impl<S: FetchSlice> Reducer for FetchReducer<S> {
    type State = Fetchable<S::Data>;
    type Action = Action;

    fn reduce(&self, state: Option<&Self::State>, action: &Action) -> Self::State {
        let current = state.cloned().unwrap_or_default();
        let kind = action.kind();

        if kind == S::REQUEST {
            tracing::trace!(slice = S::KEY, "Fetch requested");
            Fetchable {
                is_fetching: true,
                error: None,
                ..current
            }
        } else if kind == S::RECEIVE {
            match action.decode::<Received<S::Data>>() {
                Ok(received) => Fetchable {
                    is_fetching: false,
                    data: received.data,
                    received_at: Some(received.received_at),
                    error: None,
                },
                Err(error) => ignore_malformed(S::KEY, &error, current),
            }
        } else if kind == S::FAILURE {
            match action.decode::<Failed>() {
                Ok(failed) => {
                    tracing::debug!(slice = S::KEY, message = %failed.message, "Fetch failed");
                    Fetchable {
                        is_fetching: false,
                        error: Some(failed.message),
                        ..current
                    }
                },
                Err(error) => ignore_malformed(S::KEY, &error, current),
            }
        } else {
            current
        }
    }
}

fn ignore_malformed<T>(slice: &str, error: &ActionError, current: T) -> T {
    tracing::warn!(slice, error = %error, "Ignoring action with malformed payload");
    current
}

/// Action starting a fetch for slice `S`
#[must_use]
pub fn request<S: FetchSlice>() -> Action {
    Action::new(S::REQUEST)
}

/// Action delivering `data` to slice `S`, stamped with the clock's time
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if `data` cannot be serialized.
pub fn receive<S: FetchSlice>(clock: &dyn Clock, data: &S::Data) -> Result<Action, ActionError> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Payload<'a, T> {
        data: &'a T,
        received_at: DateTime<Utc>,
    }

    Action::with_payload(
        S::RECEIVE,
        &Payload {
            data,
            received_at: clock.now(),
        },
    )
}

/// Action reporting a failed fetch for slice `S`
///
/// # Errors
///
/// Never fails in practice; the signature mirrors [`receive`].
pub fn fail<S: FetchSlice>(message: impl Into<String>) -> Result<Action, ActionError> {
    Action::with_payload(
        S::FAILURE,
        &Failed {
            message: message.into(),
        },
    )
}
