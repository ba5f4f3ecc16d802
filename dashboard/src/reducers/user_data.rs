//! Per-learner detail slice (`userData`).

use super::fetchable::{self, FetchReducer, FetchSlice, Fetchable};
use crate::action_types::{LOAD_USER_DATA, REQUEST_USER_DATA, USER_DATA_FAILED};
use crate::models::LearnerDetails;
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError};

/// The learner detail slice
#[derive(Debug, Clone, Copy)]
pub struct UserData;

impl FetchSlice for UserData {
    type Data = Option<LearnerDetails>;

    const KEY: &'static str = "userData";
    const REQUEST: &'static str = REQUEST_USER_DATA;
    const RECEIVE: &'static str = LOAD_USER_DATA;
    const FAILURE: &'static str = USER_DATA_FAILED;
}

/// State of the learner detail slice
pub type UserDataState = Fetchable<Option<LearnerDetails>>;

/// Reducer owning the learner detail slice
pub type UserDataReducer = FetchReducer<UserData>;

/// Action starting a learner detail fetch
#[must_use]
pub fn request_user_data() -> Action {
    fetchable::request::<UserData>()
}

/// Action delivering one learner's details
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the details cannot be serialized.
pub fn load_user_data(clock: &dyn Clock, learner: LearnerDetails) -> Result<Action, ActionError> {
    fetchable::receive::<UserData>(clock, &Some(learner))
}

/// Action reporting a failed learner detail fetch
///
/// # Errors
///
/// See [`fetchable::fail`].
pub fn user_data_failed(message: impl Into<String>) -> Result<Action, ActionError> {
    fetchable::fail::<UserData>(message)
}
