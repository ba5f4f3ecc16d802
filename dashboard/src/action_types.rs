//! Action type discriminators handled by the dashboard's slices.

/// Courses index fetch started
pub const REQUEST_COURSES_INDEX: &str = "REQUEST_COURSES_INDEX";
/// Courses index received
pub const LOAD_COURSES_INDEX: &str = "LOAD_COURSES_INDEX";
/// Courses index fetch failed
pub const COURSES_INDEX_FAILED: &str = "COURSES_INDEX_FAILED";

/// Users index fetch started
pub const REQUEST_USERS_INDEX: &str = "REQUEST_USERS_INDEX";
/// Users index page received
pub const LOAD_USERS_INDEX: &str = "LOAD_USERS_INDEX";
/// Users index fetch failed
pub const USERS_INDEX_FAILED: &str = "USERS_INDEX_FAILED";

/// Learner details fetch started
pub const REQUEST_USER_DATA: &str = "REQUEST_USER_DATA";
/// Learner details received
pub const LOAD_USER_DATA: &str = "LOAD_USER_DATA";
/// Learner details fetch failed
pub const USER_DATA_FAILED: &str = "USER_DATA_FAILED";

/// Reports listing fetch started
pub const REQUEST_REPORTS_LIST: &str = "REQUEST_REPORTS_LIST";
/// Reports listing received
pub const LOAD_REPORTS_LIST: &str = "LOAD_REPORTS_LIST";
/// Reports listing fetch failed
pub const REPORTS_LIST_FAILED: &str = "REPORTS_LIST_FAILED";

/// Report detail fetch started
pub const REQUEST_REPORT: &str = "REQUEST_REPORT";
/// Report detail received
pub const LOAD_REPORT: &str = "LOAD_REPORT";
/// Report detail fetch failed
pub const REPORT_FAILED: &str = "REPORT_FAILED";

/// Browser location changed; owned by the routing slice
pub const LOCATION_CHANGE: &str = "@@router/LOCATION_CHANGE";
