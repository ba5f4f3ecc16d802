//! # Figures Dashboard State
//!
//! Client state of the Figures learner-progress dashboard.
//!
//! The whole state is one [`RootState`] with six slices, each owned by its own
//! reducer and combined by [`RootReducer`]:
//!
//! | Key            | Reducer                                    |
//! |----------------|--------------------------------------------|
//! | `coursesIndex` | [`reducers::CoursesIndexReducer`]          |
//! | `usersIndex`   | [`reducers::UsersIndexReducer`]            |
//! | `userData`     | [`reducers::UserDataReducer`]              |
//! | `reportsList`  | [`reducers::ReportsListReducer`]           |
//! | `report`       | [`reducers::ReportReducer`]                |
//! | `routing`      | [`routing::RoutingReducer`]                |
//!
//! Every dispatched action reaches every slice reducer exactly once; a slice
//! only ever sees its own part of the previous state.
//!
//! # Example
//!
//! ```
//! use figures_dashboard::{root_reducer, RootState};
//! use figures_state_core::{Action, Reducer};
//!
//! let reducer = root_reducer();
//! let state: RootState = reducer.reduce(None, &Action::init());
//! assert!(state.routing.location_before_transitions.is_none());
//! assert!(!state.courses_index.is_fetching);
//! ```

use figures_state_core::{combine_reducers, Action};
use serde::{Deserialize, Serialize};

pub mod action_types;
pub mod config;
pub mod models;
pub mod reducers;
pub mod routing;

pub use config::{ConfigError, DashboardConfig};

use reducers::{
    CoursesIndexReducer, ReportReducer, ReportsListReducer, UserDataReducer, UsersIndexReducer,
};
use routing::RoutingReducer;

/// Slice keys of [`RootState`], in declaration order
pub const SLICE_KEYS: [&str; 6] = [
    "coursesIndex",
    "usersIndex",
    "userData",
    "reportsList",
    "report",
    "routing",
];

combine_reducers! {
    /// The whole dashboard state
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RootState;

    /// Root reducer delegating each slice to its own reducer
    #[derive(Clone, Copy, Debug, Default)]
    pub struct RootReducer<Action = Action> {
        courses_index: CoursesIndexReducer,
        users_index: UsersIndexReducer,
        user_data: UserDataReducer,
        reports_list: ReportsListReducer,
        report: ReportReducer,
        routing: RoutingReducer,
    }
}

/// The dashboard's root reducer
#[must_use]
pub fn root_reducer() -> RootReducer {
    RootReducer::default()
}
