//! Application slice reducers.
//!
//! Each data slice is a [`FetchReducer`](fetchable::FetchReducer) over a
//! marker type that names its key and action types.

pub mod courses_index;
pub mod fetchable;
pub mod report;
pub mod reports_list;
pub mod user_data;
pub mod users_index;

pub use courses_index::{CoursesIndexReducer, CoursesIndexState};
pub use fetchable::{FetchReducer, FetchSlice, Fetchable};
pub use report::{ReportReducer, ReportState};
pub use reports_list::{ReportsListReducer, ReportsListState};
pub use user_data::{UserDataReducer, UserDataState};
pub use users_index::{UsersIndexReducer, UsersIndexState};
