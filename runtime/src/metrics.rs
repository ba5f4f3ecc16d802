//! Store metrics.
//!
//! The store records through the `metrics` facade; whichever recorder the
//! application installs receives them. Nothing is recorded until one is
//! installed.

use metrics::{describe_counter, describe_histogram, Unit};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Total actions dispatched through a store
pub const ACTIONS_TOTAL: &str = "store.actions.total";

/// Time spent in the root reducer per dispatch
pub const REDUCER_DURATION: &str = "store.reducer.duration_seconds";

/// Actions rejected because the store was shutting down
pub const REJECTED_ACTIONS: &str = "store.shutdown.rejected_actions";

/// Register descriptions for every store metric.
///
/// Call once after installing a recorder so exporters can show help text.
pub fn describe_store_metrics() {
    describe_counter!(ACTIONS_TOTAL, Unit::Count, "Total actions dispatched");
    describe_histogram!(
        REDUCER_DURATION,
        Unit::Seconds,
        "Root reducer execution time per dispatch"
    );
    describe_counter!(
        REJECTED_ACTIONS,
        Unit::Count,
        "Actions rejected during shutdown"
    );
}
