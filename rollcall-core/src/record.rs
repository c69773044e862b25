//! Attendance record types shared by every front-end.

use std::fmt;
use std::str::FromStr;

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a class was attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Present,
    Absent,
}

impl Status {
    /// The literal text stored in the attendance file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RecordError;

    /// Accepts the stored literals plus the console shorthand `P`/`A`,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "present" => Ok(Status::Present),
            "a" | "absent" => Ok(Status::Absent),
            other => Err(RecordError::BadStatus(other.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("subject must not be blank")]
    BlankSubject,
    #[error("unknown status '{0}' (expected Present/Absent or P/A)")]
    BadStatus(String),
}

/// One attendance entry.
///
/// Dates stay the text the user entered (`YYYY-MM-DD` by convention);
/// only blankness is checked. Duplicate (date, subject) pairs are
/// allowed and simply accumulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub date: String,
    pub subject: String,
    pub status: Status,
}

impl AttendanceRecord {
    /// Build a validated record. Both text fields are trimmed; a blank
    /// subject is rejected and a blank date becomes today's date.
    pub fn new(
        date: impl Into<String>,
        subject: impl Into<String>,
        status: Status,
    ) -> Result<Self, RecordError> {
        let subject = subject.into().trim().to_string();
        if subject.is_empty() {
            return Err(RecordError::BlankSubject);
        }

        let date = date.into().trim().to_string();
        let date = if date.is_empty() { today() } else { date };

        Ok(Self {
            date,
            subject,
            status,
        })
    }

    /// Today's record for `subject`.
    pub fn today(subject: impl Into<String>, status: Status) -> Result<Self, RecordError> {
        Self::new("", subject, status)
    }
}

/// Today's date in the `YYYY-MM-DD` form the store uses.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
