//! rollcall-core: record model, statistics, and aggregation for the
//! attendance tracker.
//!
//! Everything here is pure: the store hands front-ends a snapshot of
//! records, this crate derives numbers from it or transforms it, and the
//! front-end persists the result. No module touches the filesystem.

pub mod edit;
pub mod record;
pub mod stats;
pub mod summary;

pub use edit::{
    EditError, distinct_subjects, remove_at, remove_subject, remove_subject_entries, replace_at,
};
pub use record::{AttendanceRecord, RecordError, Status, today};
pub use stats::{Needed, Stats, Target, TargetError, calculate_stats, percentage};
pub use summary::{
    SubjectStats, SummaryError, day_log, monthly_summary, overall_summary, subject_summary,
};
