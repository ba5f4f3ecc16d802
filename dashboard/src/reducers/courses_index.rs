//! Courses index slice (`coursesIndex`).

use super::fetchable::{self, FetchReducer, FetchSlice, Fetchable};
use crate::action_types::{COURSES_INDEX_FAILED, LOAD_COURSES_INDEX, REQUEST_COURSES_INDEX};
use crate::models::CourseSummary;
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError};

/// The courses index slice
#[derive(Debug, Clone, Copy)]
pub struct CoursesIndex;

impl FetchSlice for CoursesIndex {
    type Data = Vec<CourseSummary>;

    const KEY: &'static str = "coursesIndex";
    const REQUEST: &'static str = REQUEST_COURSES_INDEX;
    const RECEIVE: &'static str = LOAD_COURSES_INDEX;
    const FAILURE: &'static str = COURSES_INDEX_FAILED;
}

/// State of the courses index slice
pub type CoursesIndexState = Fetchable<Vec<CourseSummary>>;

/// Reducer owning the courses index slice
pub type CoursesIndexReducer = FetchReducer<CoursesIndex>;

/// Courses belonging to `org`
pub fn courses_for_org<'a>(
    state: &'a CoursesIndexState,
    org: &'a str,
) -> impl Iterator<Item = &'a CourseSummary> + 'a {
    state.data.iter().filter(move |course| course.org == org)
}

/// Action starting a courses index fetch
#[must_use]
pub fn request_courses_index() -> Action {
    fetchable::request::<CoursesIndex>()
}

/// Action delivering the courses index
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the courses cannot be serialized.
pub fn load_courses_index(
    clock: &dyn Clock,
    courses: &[CourseSummary],
) -> Result<Action, ActionError> {
    fetchable::receive::<CoursesIndex>(clock, &courses.to_vec())
}

/// Action reporting a failed courses index fetch
///
/// # Errors
///
/// See [`fetchable::fail`].
pub fn courses_index_failed(message: impl Into<String>) -> Result<Action, ActionError> {
    fetchable::fail::<CoursesIndex>(message)
}
