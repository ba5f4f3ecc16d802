//! Domain types returned by the Figures REST API.
//!
//! Field names follow the API's JSON, so these decode straight from action
//! payloads built from API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size of the API's limit/offset pagination
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One entry of the courses index
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course key, e.g. `course-v1:AlphaOrg+A001+RUN`
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning organization
    pub org: String,
}

/// A page of a limit/offset paginated listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of records across all pages
    pub count: u64,
    /// URL of the next page
    pub next: Option<String>,
    /// URL of the previous page
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Whether more records exist after this page
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Whether the listing has no records at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0 && self.results.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// One entry of the users index
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Full name from the learner profile
    pub fullname: String,
}

/// Progress of a learner in one course
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerCourse {
    /// Course key
    pub course_id: String,
    /// Display name
    pub course_name: String,
    /// Completed fraction, 0.0 to 1.0
    pub progress: f64,
}

/// Detail record for a single learner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LearnerDetails {
    /// User id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Whether the account is active
    pub is_active: bool,
    /// When the account was created
    pub date_joined: DateTime<Utc>,
    /// Enrolled courses
    #[serde(default)]
    pub courses: Vec<LearnerCourse>,
}

impl LearnerDetails {
    /// Progress in `course_id`, if the learner is enrolled
    #[must_use]
    pub fn progress_in(&self, course_id: &str) -> Option<f64> {
        self.courses
            .iter()
            .find(|course| course.course_id == course_id)
            .map(|course| course.progress)
    }
}

/// One entry of the reports listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Report id
    pub id: u64,
    /// Report title
    pub title: String,
    /// When the report was generated
    pub created_at: DateTime<Utc>,
}

/// A generated report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportDetail {
    /// Report id
    pub id: u64,
    /// Report title
    pub title: String,
    /// When the report was generated
    pub created_at: DateTime<Utc>,
    /// Report rows as returned by the API
    #[serde(default)]
    pub rows: Vec<Value>,
}
