//! Reports listing slice (`reportsList`).

use super::fetchable::{self, FetchReducer, FetchSlice, Fetchable};
use crate::action_types::{LOAD_REPORTS_LIST, REPORTS_LIST_FAILED, REQUEST_REPORTS_LIST};
use crate::models::ReportSummary;
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError};

/// The reports listing slice
#[derive(Debug, Clone, Copy)]
pub struct ReportsList;

impl FetchSlice for ReportsList {
    type Data = Vec<ReportSummary>;

    const KEY: &'static str = "reportsList";
    const REQUEST: &'static str = REQUEST_REPORTS_LIST;
    const RECEIVE: &'static str = LOAD_REPORTS_LIST;
    const FAILURE: &'static str = REPORTS_LIST_FAILED;
}

/// State of the reports listing slice
pub type ReportsListState = Fetchable<Vec<ReportSummary>>;

/// Reducer owning the reports listing slice
pub type ReportsListReducer = FetchReducer<ReportsList>;

/// Loaded reports, most recent first
#[must_use]
pub fn newest_first(state: &ReportsListState) -> Vec<&ReportSummary> {
    let mut reports: Vec<_> = state.data.iter().collect();
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reports
}

/// Action starting a reports listing fetch
#[must_use]
pub fn request_reports_list() -> Action {
    fetchable::request::<ReportsList>()
}

/// Action delivering the reports listing
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the reports cannot be serialized.
pub fn load_reports_list(
    clock: &dyn Clock,
    reports: &[ReportSummary],
) -> Result<Action, ActionError> {
    fetchable::receive::<ReportsList>(clock, &reports.to_vec())
}

/// Action reporting a failed reports listing fetch
///
/// # Errors
///
/// See [`fetchable::fail`].
pub fn reports_list_failed(message: impl Into<String>) -> Result<Action, ActionError> {
    fetchable::fail::<ReportsList>(message)
}
