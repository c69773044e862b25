//! rollcall-store: CSV-backed persistence for attendance records.
//!
//! The store owns the backing file; callers get disposable snapshots
//! and write whole snapshots back. The format is the three-column table
//! `Date,Subject,Status`, one row per record, `Status` holding the
//! literal text `Present` or `Absent`.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rollcall_core::{AttendanceRecord, Status};
use thiserror::Error;

const HEADER: [&str; 3] = ["Date", "Subject", "Status"];

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("attendance file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("attendance file error: {0}")]
    Csv(#[from] csv::Error),
    #[error("bad row {row}: {reason}")]
    Malformed { row: u64, reason: String },
}

/// CSV record store rooted at one file path.
///
/// The path is injected at construction (resolved once at startup by
/// the front-end); nothing is cached between calls, so every operation
/// re-reads or rewrites the file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file holds any data rows.
    pub fn has_data(&self) -> Result<bool, StoreError> {
        Ok(!self.load()?.is_empty())
    }

    /// All records in file order. A missing file or a header-only file
    /// is an empty snapshot, not an error.
    ///
    /// Rows are read by column position, so either front-end variant's
    /// header capitalization loads fine.
    pub fn load(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);

            let date = row.get(0).unwrap_or("").trim();
            let subject = row.get(1).unwrap_or("").trim();
            let status = row.get(2).unwrap_or("").trim();
            if date.is_empty() && subject.is_empty() && status.is_empty() {
                continue;
            }

            let status: Status = status.parse().map_err(|e| StoreError::Malformed {
                row: line,
                reason: format!("{e}"),
            })?;

            records.push(AttendanceRecord {
                date: date.to_string(),
                subject: subject.to_string(),
                status,
            });
        }

        Ok(records)
    }

    /// Rewrite the whole store: header row first, then one row per
    /// record. The new contents land in a sibling temp file that is
    /// renamed over the store, so a failed write never leaves a
    /// half-written file behind.
    pub fn save_all(&self, records: &[AttendanceRecord]) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;

        let tmp = self.path.with_extension("csv.tmp");
        let mut wtr = csv::Writer::from_path(&tmp)?;
        wtr.write_record(HEADER)?;
        for r in records {
            wtr.write_record([r.date.as_str(), r.subject.as_str(), r.status.as_str()])?;
        }
        wtr.flush()?;
        drop(wtr);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Append one record without rewriting prior rows. Creates the file
    /// with its header when it does not exist yet (or is empty).
    pub fn append(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;

        let need_header = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::Writer::from_writer(file);
        if need_header {
            wtr.write_record(HEADER)?;
        }
        wtr.write_record([
            record.date.as_str(),
            record.subject.as_str(),
            record.status.as_str(),
        ])?;
        wtr.flush()?;
        Ok(())
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rec(date: &str, subject: &str, status: Status) -> AttendanceRecord {
        AttendanceRecord::new(date, subject, status).unwrap()
    }

    fn store_in(dir: &TempDir) -> CsvStore {
        CsvStore::new(dir.path().join("attendance.csv"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.has_data().unwrap());
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .append(&rec("2024-01-01", "Math", Status::Present))
            .unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, vec!["Date,Subject,Status", "2024-01-01,Math,Present"]);
        assert!(store.has_data().unwrap());
    }

    #[test]
    fn test_append_writes_header_only_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .append(&rec("2024-01-01", "Math", Status::Present))
            .unwrap();
        store
            .append(&rec("2024-01-02", "Math", Status::Absent))
            .unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].status, Status::Absent);
    }

    #[test]
    fn test_save_all_empty_leaves_header_only_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .append(&rec("2024-01-01", "Math", Status::Present))
            .unwrap();

        store.save_all(&[]).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.trim_end(), "Date,Subject,Status");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_all_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let records = vec![
            rec("2024-01-01", "Math", Status::Present),
            rec("2024-01-02", "Art, advanced", Status::Absent),
        ];
        store.save_all(&records).unwrap();
        assert_eq!(store.load().unwrap(), records);

        // save_all(load()) is idempotent down to the bytes.
        let before = fs::read_to_string(store.path()).unwrap();
        store.save_all(&store.load().unwrap()).unwrap();
        let after = fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_load_accepts_lowercase_header() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "date, subject, status\n2024-01-01,Math,Present\n",
        )
        .unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].subject, "Math");
    }

    #[test]
    fn test_load_rejects_unknown_status() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Date,Subject,Status\n2024-01-01,Math,Late\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save_all(&[rec("2024-01-01", "Math", Status::Present)])
            .unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["attendance.csv"]);
    }
}
