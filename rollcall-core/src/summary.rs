//! Grouping a record snapshot into per-subject statistics.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::record::{AttendanceRecord, Status};
use crate::stats::{Needed, Target, calculate_stats};

/// Aggregated view of one subject (or of the whole store). Derived on
/// demand from a snapshot, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub subject: String,
    pub total: u32,
    pub present: u32,
    pub percentage: f64,
    pub needed: Needed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The store has no records at all.
    #[error("no attendance data recorded yet")]
    EmptyStore,
    /// The store has records, but none matched the filter.
    #[error("no records found for {0}")]
    NoMatch(String),
}

#[derive(Debug, Clone, Copy, Default)]
struct Counts {
    total: u32,
    present: u32,
}

impl Counts {
    fn note(&mut self, status: Status) {
        self.total += 1;
        if status == Status::Present {
            self.present += 1;
        }
    }
}

// BTreeMap keeps summaries in subject order, matching the sorted
// subject pickers of the windowed front-end.
fn group_counts<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
) -> BTreeMap<&'a str, Counts> {
    let mut groups: BTreeMap<&str, Counts> = BTreeMap::new();
    for r in records {
        groups.entry(&r.subject).or_default().note(r.status);
    }
    groups
}

fn to_stats(subject: &str, counts: Counts, target: Target) -> SubjectStats {
    let stats = calculate_stats(counts.present, counts.total, target);
    SubjectStats {
        subject: subject.to_string(),
        total: counts.total,
        present: counts.present,
        percentage: stats.percentage,
        needed: stats.needed,
    }
}

/// Per-subject statistics over the whole snapshot, sorted by subject.
pub fn subject_summary(
    records: &[AttendanceRecord],
    target: Target,
) -> Result<Vec<SubjectStats>, SummaryError> {
    if records.is_empty() {
        return Err(SummaryError::EmptyStore);
    }
    Ok(group_counts(records)
        .into_iter()
        .map(|(subject, counts)| to_stats(subject, counts, target))
        .collect())
}

/// Like [`subject_summary`], restricted to records whose date starts
/// with the `YYYY-MM` prefix `month`.
pub fn monthly_summary(
    records: &[AttendanceRecord],
    month: &str,
    target: Target,
) -> Result<Vec<SubjectStats>, SummaryError> {
    if records.is_empty() {
        return Err(SummaryError::EmptyStore);
    }
    let groups = group_counts(records.iter().filter(|r| r.date.starts_with(month)));
    if groups.is_empty() {
        return Err(SummaryError::NoMatch(month.to_string()));
    }
    Ok(groups
        .into_iter()
        .map(|(subject, counts)| to_stats(subject, counts, target))
        .collect())
}

/// One combined count across every record.
pub fn overall_summary(
    records: &[AttendanceRecord],
    target: Target,
) -> Result<SubjectStats, SummaryError> {
    if records.is_empty() {
        return Err(SummaryError::EmptyStore);
    }
    let mut counts = Counts::default();
    for r in records {
        counts.note(r.status);
    }
    Ok(to_stats("Overall", counts, target))
}

/// The `(subject, status)` pairs recorded on exactly `date`, in file
/// order, with no aggregation.
pub fn day_log<'a>(
    records: &'a [AttendanceRecord],
    date: &str,
) -> Result<Vec<(&'a str, Status)>, SummaryError> {
    if records.is_empty() {
        return Err(SummaryError::EmptyStore);
    }
    let entries: Vec<_> = records
        .iter()
        .filter(|r| r.date == date)
        .map(|r| (r.subject.as_str(), r.status))
        .collect();
    if entries.is_empty() {
        return Err(SummaryError::NoMatch(date.to_string()));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, subject: &str, status: Status) -> AttendanceRecord {
        AttendanceRecord::new(date, subject, status).unwrap()
    }

    fn target() -> Target {
        Target::new(75.0).unwrap()
    }

    fn sample() -> Vec<AttendanceRecord> {
        vec![
            rec("2024-01-01", "Math", Status::Present),
            rec("2024-01-02", "Math", Status::Absent),
            rec("2024-01-02", "Physics", Status::Present),
            rec("2024-02-05", "Physics", Status::Present),
        ]
    }

    #[test]
    fn test_empty_store_is_distinct_from_no_match() {
        assert_eq!(
            subject_summary(&[], target()).unwrap_err(),
            SummaryError::EmptyStore
        );
        assert_eq!(
            monthly_summary(&[], "2024-01", target()).unwrap_err(),
            SummaryError::EmptyStore
        );
        assert_eq!(
            monthly_summary(&sample(), "2024-03", target()).unwrap_err(),
            SummaryError::NoMatch("2024-03".to_string())
        );
    }

    #[test]
    fn test_subject_summary_counts_and_needed() {
        let rows = subject_summary(&sample(), target()).unwrap();
        assert_eq!(rows.len(), 2);

        // Sorted by subject.
        let math = &rows[0];
        assert_eq!(math.subject, "Math");
        assert_eq!(math.total, 2);
        assert_eq!(math.present, 1);
        assert_eq!(math.percentage, 50.0);
        assert_eq!(math.needed, Needed::Classes(2));

        let physics = &rows[1];
        assert_eq!(physics.subject, "Physics");
        assert_eq!(physics.percentage, 100.0);
        assert_eq!(physics.needed, Needed::Classes(0));
    }

    #[test]
    fn test_monthly_summary_filters_by_prefix() {
        let rows = monthly_summary(&sample(), "2024-01", target()).unwrap();
        assert_eq!(rows.len(), 2);
        let physics = rows.iter().find(|s| s.subject == "Physics").unwrap();
        // Only the January class counts.
        assert_eq!(physics.total, 1);
        assert_eq!(physics.present, 1);
    }

    #[test]
    fn test_overall_summary() {
        let overall = overall_summary(&sample(), target()).unwrap();
        assert_eq!(overall.total, 4);
        assert_eq!(overall.present, 3);
        assert_eq!(overall.percentage, 75.0);
        assert_eq!(overall.needed, Needed::Classes(0));

        assert_eq!(
            overall_summary(&[], target()).unwrap_err(),
            SummaryError::EmptyStore
        );
    }

    #[test]
    fn test_day_log_keeps_file_order() {
        let binding = sample();
        let entries = day_log(&binding, "2024-01-02").unwrap();
        assert_eq!(
            entries,
            vec![("Math", Status::Absent), ("Physics", Status::Present)]
        );

        assert_eq!(
            day_log(&sample(), "2024-12-25").unwrap_err(),
            SummaryError::NoMatch("2024-12-25".to_string())
        );
        assert_eq!(
            day_log(&[], "2024-01-02").unwrap_err(),
            SummaryError::EmptyStore
        );
    }
}
