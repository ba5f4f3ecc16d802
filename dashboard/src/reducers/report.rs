//! Report detail slice (`report`).

use super::fetchable::{self, FetchReducer, FetchSlice, Fetchable};
use crate::action_types::{LOAD_REPORT, REPORT_FAILED, REQUEST_REPORT};
use crate::models::ReportDetail;
use figures_state_core::environment::Clock;
use figures_state_core::{Action, ActionError};

/// The report detail slice
#[derive(Debug, Clone, Copy)]
pub struct Report;

impl FetchSlice for Report {
    type Data = Option<ReportDetail>;

    const KEY: &'static str = "report";
    const REQUEST: &'static str = REQUEST_REPORT;
    const RECEIVE: &'static str = LOAD_REPORT;
    const FAILURE: &'static str = REPORT_FAILED;
}

/// State of the report detail slice
pub type ReportState = Fetchable<Option<ReportDetail>>;

/// Reducer owning the report detail slice
pub type ReportReducer = FetchReducer<Report>;

/// Number of rows in the loaded report (0 when none is loaded)
#[must_use]
pub fn row_count(state: &ReportState) -> usize {
    state.data.as_ref().map_or(0, |report| report.rows.len())
}

/// Action starting a report detail fetch
#[must_use]
pub fn request_report() -> Action {
    fetchable::request::<Report>()
}

/// Action delivering a report
///
/// # Errors
///
/// Returns [`ActionError::InvalidPayload`] if the report cannot be serialized.
pub fn load_report(clock: &dyn Clock, report: ReportDetail) -> Result<Action, ActionError> {
    fetchable::receive::<Report>(clock, &Some(report))
}

/// Action reporting a failed report detail fetch
///
/// # Errors
///
/// See [`fetchable::fail`].
pub fn report_failed(message: impl Into<String>) -> Result<Action, ActionError> {
    fetchable::fail::<Report>(message)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use figures_state_core::Reducer;
    use figures_state_testing::test_clock;
    use serde_json::json;

    fn detail() -> ReportDetail {
        ReportDetail {
            id: 9,
            title: "Monthly active users".to_string(),
            created_at: test_clock().now(),
            rows: vec![
                json!({"month": "2024-11", "mau": 120}),
                json!({"month": "2024-12", "mau": 134}),
            ],
        }
    }

    #[test]
    fn test_load_report() {
        let state = ReportReducer::new().reduce(None, &load_report(&test_clock(), detail()).unwrap());

        assert_eq!(row_count(&state), 2);
        assert_eq!(state.data.as_ref().map(|r| r.id), Some(9));
    }

    #[test]
    fn test_row_count_without_report() {
        let state = ReportReducer::new().reduce(None, &request_report());
        assert_eq!(row_count(&state), 0);
        assert!(state.is_fetching);
    }

    #[test]
    fn test_payload_decodes_from_api_json() {
        let action = Action::from_value(
            LOAD_REPORT,
            json!({
                "data": {
                    "id": 3,
                    "title": "Enrollments",
                    "created_at": "2025-01-01T00:00:00Z"
                },
                "receivedAt": "2025-01-01T00:00:05Z"
            }),
        );

        let state = ReportReducer::new().reduce(None, &action);

        let report = state.data.unwrap();
        assert_eq!(report.title, "Enrollments");
        assert!(report.rows.is_empty());
    }

    #[test]
    fn test_failure() {
        let state = ReportReducer::new().reduce(None, &report_failed("report expired").unwrap());
        assert_eq!(state.error.as_deref(), Some("report expired"));
        assert_eq!(row_count(&state), 0);
    }
}
