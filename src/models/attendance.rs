//! Attendance record model.
//!
//! This module defines the [`AttendanceRecord`] struct representing one
//! check-in/check-out session of an employee.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Whether a breakdown reflects a session still in progress or a closed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownMode {
    /// Still checked in; computed against "now".
    Preview,
    /// Checked out; computed against the check-out time.
    Final,
}

/// A single attendance session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: String,
    /// The employee who checked in.
    pub employee_id: String,
    /// When the employee checked in (local wall-clock time).
    pub check_in: NaiveDateTime,
    /// When the employee checked out, if they have.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
}

impl AttendanceRecord {
    /// Returns true while the employee has not checked out.
    pub fn is_open(&self) -> bool {
        self.check_out.is_none()
    }

    /// The calendar day the session is attributed to.
    pub fn work_date(&self) -> NaiveDate {
        self.check_in.date()
    }

    /// The as-of time for a breakdown: the check-out once recorded,
    /// otherwise `now`.
    ///
    /// # Example
    ///
    /// ```
    /// use worktime_engine::models::{AttendanceRecord, BreakdownMode};
    /// use chrono::NaiveDateTime;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let record = AttendanceRecord {
    ///     id: "att_001".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     check_in: at("2026-01-15 09:00:00"),
    ///     check_out: None,
    /// };
    ///
    /// let now = at("2026-01-15 12:30:00");
    /// assert_eq!(record.reference_time(now), (now, BreakdownMode::Preview));
    /// ```
    pub fn reference_time(&self, now: NaiveDateTime) -> (NaiveDateTime, BreakdownMode) {
        match self.check_out {
            Some(check_out) => (check_out, BreakdownMode::Final),
            None => (now, BreakdownMode::Preview),
        }
    }
}
