//! Pure edits over a loaded snapshot.
//!
//! The store only supports whole-file rewrites, so every mutation is a
//! load → transform → `save_all` cycle; these are the transforms. Index
//! checks happen before anything is touched, so a failed call leaves the
//! snapshot unchanged.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::record::AttendanceRecord;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("entry {index} is out of range ({len} entries)")]
    OutOfRange { index: usize, len: usize },
}

/// Remove the record at `index`, returning it.
pub fn remove_at(
    records: &mut Vec<AttendanceRecord>,
    index: usize,
) -> Result<AttendanceRecord, EditError> {
    if index >= records.len() {
        return Err(EditError::OutOfRange {
            index,
            len: records.len(),
        });
    }
    Ok(records.remove(index))
}

/// Replace the record at `index`.
pub fn replace_at(
    records: &mut [AttendanceRecord],
    index: usize,
    record: AttendanceRecord,
) -> Result<(), EditError> {
    let len = records.len();
    let slot = records
        .get_mut(index)
        .ok_or(EditError::OutOfRange { index, len })?;
    *slot = record;
    Ok(())
}

/// Drop every record for `subject`, keeping the rest in their original
/// relative order. Returns how many records were removed.
pub fn remove_subject(records: &mut Vec<AttendanceRecord>, subject: &str) -> usize {
    let before = records.len();
    records.retain(|r| r.subject != subject);
    before - records.len()
}

/// Drop the records for `subject` at the given positions *within that
/// subject's entries* (0-based, in the order a subject listing shows
/// them). Any out-of-range position rejects the whole call.
pub fn remove_subject_entries(
    records: &mut Vec<AttendanceRecord>,
    subject: &str,
    positions: &[usize],
) -> Result<usize, EditError> {
    let subject_rows: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.subject == subject)
        .map(|(i, _)| i)
        .collect();

    for &p in positions {
        if p >= subject_rows.len() {
            return Err(EditError::OutOfRange {
                index: p,
                len: subject_rows.len(),
            });
        }
    }

    let doomed: BTreeSet<usize> = positions.iter().map(|&p| subject_rows[p]).collect();
    let mut i = 0;
    records.retain(|_| {
        let keep = !doomed.contains(&i);
        i += 1;
        keep
    });
    Ok(doomed.len())
}

/// Sorted, deduplicated subject names.
pub fn distinct_subjects(records: &[AttendanceRecord]) -> Vec<String> {
    let mut subjects: Vec<String> = records.iter().map(|r| r.subject.clone()).collect();
    subjects.sort();
    subjects.dedup();
    subjects
}
