//! Users index slice (`usersIndex`).
//!
//! Holds the most recently loaded page of the paginated user index.

use super::fetchable::{self, FetchReducer, FetchSlice, Fetchable};
use crate::action_types::{LOAD_USERS_INDEX, REQUEST_USERS_INDEX, USERS_INDEX_FAILED};
use crate::models::{Page, UserSummary};
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError};

/// The users index slice
#[derive(Debug, Clone, Copy)]
pub struct UsersIndex;

impl FetchSlice for UsersIndex {
    type Data = Page<UserSummary>;

    const KEY: &'static str = "usersIndex";
    const REQUEST: &'static str = REQUEST_USERS_INDEX;
    const RECEIVE: &'static str = LOAD_USERS_INDEX;
    const FAILURE: &'static str = USERS_INDEX_FAILED;
}

/// State of the users index slice
pub type UsersIndexState = Fetchable<Page<UserSummary>>;

/// Reducer owning the users index slice
pub type UsersIndexReducer = FetchReducer<UsersIndex>;

/// URL of the page after the loaded one, unless a fetch is in flight
#[must_use]
pub fn next_page(state: &UsersIndexState) -> Option<&str> {
    if state.is_fetching {
        return None;
    }
    state.data.next.as_deref()
}

/// Action starting a users index fetch
#[must_use]
pub fn request_users_index() -> Action {
    fetchable::request::<UsersIndex>()
}

/// Action delivering one page of the users index
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the page cannot be serialized.
pub fn load_users_index(clock: &dyn Clock, page: &Page<UserSummary>) -> Result<Action, ActionError> {
    fetchable::receive::<UsersIndex>(clock, page)
}

/// Action reporting a failed users index fetch
///
/// # Errors
///
/// See [`fetchable::fail`].
pub fn users_index_failed(message: impl Into<String>) -> Result<Action, ActionError> {
    fetchable::fail::<UsersIndex>(message)
}
