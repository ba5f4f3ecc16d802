//! # Figures State Core
//!
//! Core traits and types for the Figures dashboard client state.
//!
//! The dashboard keeps its state as a set of named slices. Each slice is owned
//! by a reducer that knows nothing about the others, and a root reducer built
//! with [`combine_reducers`](composition::combine_reducers) (or the typed
//! [`combine_reducers!`] macro) fans every dispatched action out to all of them.
//!
//! ## Core Concepts
//!
//! - **Action**: An opaque tagged value, a type discriminator plus a JSON payload
//! - **Reducer**: Pure function `(Option<&State>, &Action) → State`
//! - **Slice**: A named portion of the whole state, owned by one reducer
//! - **Clock**: Injected time source for action creators
//!
//! ## Example
//!
//! ```
//! use figures_state_core::{reducer_fn, Action, Reducer};
//!
//! let counter = reducer_fn(|state: Option<&i64>, action: &Action| {
//!     let count = state.copied().unwrap_or_default();
//!     if action.is("INCREMENT") { count + 1 } else { count }
//! });
//!
//! let initial = counter.reduce(None, &Action::init());
//! let next = counter.reduce(Some(&initial), &Action::new("INCREMENT"));
//! assert_eq!(next, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use serde_json::{Map, Value};

pub mod composition;

pub use action::Action;
pub use composition::{combine_reducers, reducer_fn, CombinedReducer, FnReducer, SliceMap};
pub use error::{ActionError, CompositionError};
pub use reducer::Reducer;

/// Error types for action decoding and reducer composition
pub mod error {
    use thiserror::Error;

    /// Errors raised while reading an action's payload
    #[derive(Error, Debug)]
    pub enum ActionError {
        /// The action carries no payload but one was required
        #[error("Action {0} has no payload")]
        MissingPayload(String),

        /// The payload could not be decoded into the requested type
        #[error("Invalid payload for action {action_type}: {source}")]
        InvalidPayload {
            /// Type discriminator of the offending action
            action_type: String,
            /// Underlying decode error
            #[source]
            source: serde_json::Error,
        },
    }

    /// Errors raised while building a combined reducer
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum CompositionError {
        /// Two reducers were registered under the same slice key
        #[error("Slice {0:?} is registered more than once")]
        DuplicateSlice(String),

        /// A reducer was registered under an empty key
        #[error("Slice keys must not be empty")]
        EmptySliceKey,
    }
}

/// Action module - Opaque tagged input dispatched to every slice reducer
///
/// An action is a string type discriminator plus an arbitrary JSON payload.
/// On the wire it looks like `{"type": "LOAD_REPORT", "payload": {...}}`.
pub mod action {
    use super::error::ActionError;
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    /// Type of the action dispatched when a store is created.
    ///
    /// No reducer should handle it; its only purpose is to make every slice
    /// reducer return its default.
    pub const INIT: &str = "@@figures/INIT";

    /// An opaque tagged action
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Action {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default, skip_serializing_if = "Value::is_null")]
        payload: Value,
    }

    impl Action {
        /// Create an action with no payload
        #[must_use]
        pub fn new(kind: impl Into<String>) -> Self {
            Self {
                kind: kind.into(),
                payload: Value::Null,
            }
        }

        /// Create an action carrying a serialized payload
        ///
        /// # Errors
        ///
        /// Returns [`ActionError::InvalidPayload`] if `payload` cannot be
        /// represented as JSON (for example a map with non-string keys).
        pub fn with_payload<P: Serialize>(
            kind: impl Into<String>,
            payload: &P,
        ) -> Result<Self, ActionError> {
            let kind = kind.into();
            let payload = serde_json::to_value(payload).map_err(|source| {
                ActionError::InvalidPayload {
                    action_type: kind.clone(),
                    source,
                }
            })?;
            Ok(Self { kind, payload })
        }

        /// Create an action from an already-built JSON payload
        #[must_use]
        pub fn from_value(kind: impl Into<String>, payload: Value) -> Self {
            Self {
                kind: kind.into(),
                payload,
            }
        }

        /// The store initialization action
        #[must_use]
        pub fn init() -> Self {
            Self::new(INIT)
        }

        /// The type discriminator
        #[must_use]
        pub fn kind(&self) -> &str {
            &self.kind
        }

        /// Whether this action has the given type
        #[must_use]
        pub fn is(&self, kind: &str) -> bool {
            self.kind == kind
        }

        /// The raw payload (`Value::Null` when absent)
        #[must_use]
        pub const fn payload(&self) -> &Value {
            &self.payload
        }

        /// Decode the payload into `T`
        ///
        /// # Errors
        ///
        /// - [`ActionError::MissingPayload`] if the action has no payload
        /// - [`ActionError::InvalidPayload`] if the payload does not match `T`
        pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ActionError> {
            if self.payload.is_null() {
                return Err(ActionError::MissingPayload(self.kind.clone()));
            }
            T::deserialize(&self.payload).map_err(|source| ActionError::InvalidPayload {
                action_type: self.kind.clone(),
                source,
            })
        }
    }

    /// Actions that can initialize a store
    pub trait InitAction {
        /// Build the initialization action
        fn init() -> Self;
    }

    impl InitAction for Action {
        fn init() -> Self {
            Self::init()
        }
    }
}

/// Reducer module - The core trait for slice logic
pub mod reducer {
    /// The Reducer trait - a pure slice update function
    ///
    /// # Type Parameters
    ///
    /// - `State`: The slice value this reducer owns
    /// - `Action`: The action type this reducer processes
    ///
    /// # Example
    ///
    /// ```
    /// use figures_state_core::{Action, Reducer};
    ///
    /// struct Visits;
    ///
    /// impl Reducer for Visits {
    ///     type State = u32;
    ///     type Action = Action;
    ///
    ///     fn reduce(&self, state: Option<&u32>, action: &Action) -> u32 {
    ///         let visits = state.copied().unwrap_or(0);
    ///         if action.is("VISIT") { visits + 1 } else { visits }
    ///     }
    /// }
    ///
    /// assert_eq!(Visits.reduce(None, &Action::init()), 0);
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// Compute the next state from the current one and an action
        ///
        /// `state` is `None` when the slice has no value yet, in which case
        /// the reducer answers with its default (updated by `action` if the
        /// action concerns it). The current value is only borrowed: reducers
        /// return a new value and never modify the old one.
        ///
        /// Actions the reducer does not recognize must return a value equal
        /// to the current state.
        fn reduce(&self, state: Option<&Self::State>, action: &Self::Action) -> Self::State;
    }

    impl<R: Reducer + ?Sized> Reducer for Box<R> {
        type State = R::State;
        type Action = R::Action;

        fn reduce(&self, state: Option<&Self::State>, action: &Self::Action) -> Self::State {
            (**self).reduce(state, action)
        }
    }

    impl<R: Reducer + ?Sized> Reducer for std::sync::Arc<R> {
        type State = R::State;
        type Action = R::Action;

        fn reduce(&self, state: Option<&Self::State>, action: &Self::Action) -> Self::State {
            (**self).reduce(state, action)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// Reducers stay pure; anything impure (time, ids) is injected into the
/// action creators that build the actions reducers consume.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// let clock = SystemClock;
    ///
    /// // Test - fixed time for deterministic tests
    /// let clock = FixedClock::new(time);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_wire_format() {
        let action = Action::from_value("LOAD_REPORT", json!({"id": 7}));
        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded, json!({"type": "LOAD_REPORT", "payload": {"id": 7}}));

        let decoded: Action = serde_json::from_value(json!({"type": "NOOP"})).unwrap();
        assert!(decoded.is("NOOP"));
        assert!(decoded.payload().is_null());
    }

    #[test]
    fn test_decode_payload() {
        #[derive(Deserialize)]
        struct Id {
            id: u64,
        }

        let action = Action::from_value("LOAD_REPORT", json!({"id": 7}));
        assert_eq!(action.decode::<Id>().unwrap().id, 7);

        let missing = Action::new("LOAD_REPORT");
        assert!(matches!(
            missing.decode::<Id>(),
            Err(ActionError::MissingPayload(kind)) if kind == "LOAD_REPORT"
        ));

        let wrong = Action::from_value("LOAD_REPORT", json!({"id": "seven"}));
        assert!(matches!(
            wrong.decode::<Id>(),
            Err(ActionError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_init_action() {
        assert_eq!(Action::init().kind(), action::INIT);
        assert_eq!(<Action as action::InitAction>::init(), Action::init());
    }
}
