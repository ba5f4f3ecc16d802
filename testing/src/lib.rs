//! # Figures State Testing
//!
//! Testing utilities and helpers for the Figures dashboard client state.
//!
//! This crate provides:
//! - A fixed clock for deterministic action creators
//! - [`ReducerTest`], a Given-When-Then harness for slice and root reducers
//! - [`RecordingReducer`], a slice reducer that records every call it receives
//! - proptest strategies for actions
//!
//! ## Example
//!
//! ```ignore
//! use figures_state_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(CoursesIndexReducer)
//!     .given_no_state()
//!     .when_action(load_courses_index(&test_clock(), courses)?)
//!     .then_state(|state| assert_eq!(state.data.len(), 4))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use figures_state_core::environment::Clock;

mod recording;

pub use recording::{RecordedCall, RecordingReducer};
pub use reducer_test::{assertions, ReducerTest};

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use figures_state_testing::mocks::FixedClock;
    /// use figures_state_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use figures_state_core::Action;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    /// Action type discriminators in the dashboard's style (`SCREAMING_SNAKE`)
    pub fn arb_action_type() -> impl Strategy<Value = String> {
        "[A-Z][A-Z_]{0,23}"
    }

    /// Small JSON payloads: absent, scalars, or a flat object
    pub fn arb_payload() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z ]{0,16}".prop_map(Value::String),
            prop::collection::btree_map("[a-z]{1,8}", any::<u32>(), 0..4)
                .prop_map(|fields| json!(fields)),
        ]
    }

    /// Arbitrary actions
    pub fn arb_action() -> impl Strategy<Value = Action> {
        (arb_action_type(), arb_payload()).prop_map(|(kind, payload)| Action::from_value(kind, payload))
    }

    /// Arbitrary actions whose type is not in `handled`
    ///
    /// Use this to check that a reducer leaves its slice alone for actions it
    /// does not handle.
    pub fn arb_unhandled_action(handled: &'static [&'static str]) -> impl Strategy<Value = Action> {
        arb_action().prop_filter("action type is handled", move |action| {
            !handled.iter().any(|kind| *kind == action.kind())
        })
    }
}

// Re-export commonly used items
pub use mocks::{test_clock, FixedClock};
