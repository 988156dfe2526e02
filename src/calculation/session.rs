//! Attendance session breakdowns.
//!
//! Applies the working-time calculation to an [`AttendanceRecord`], choosing
//! the reference time from the record's state: the check-out once the
//! employee has left, otherwise the supplied "now".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AttendanceRecord, BreakdownMode, WorkBreakdown};

use super::shift_window::ResolvedShift;
use super::work_breakdown::validate_work_window;

/// The breakdown of one attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBreakdown {
    /// The attendance record this breakdown belongs to.
    pub record_id: String,
    /// Preview for an open session, final for a closed one.
    pub mode: BreakdownMode,
    /// The time the breakdown was computed against.
    pub reference_time: NaiveDateTime,
    /// The computed minutes.
    pub breakdown: WorkBreakdown,
}

/// Computes the breakdown of `record` against `shift`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidWorkWindow`] if the reference
/// time (check-out, or `now` for an open session) is before the check-in.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::{ResolvedShift, calculate_session_breakdown};
/// use worktime_engine::models::{AttendanceRecord, BreakdownMode, ShiftConfig};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let shift = ResolvedShift::from_config(
///     &ShiftConfig::new("9:00 AM", "6:00 PM", Decimal::new(9, 0)),
/// ).unwrap();
/// let record = AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     check_in: at("2026-01-15 08:00"),
///     check_out: None,
/// };
///
/// let session = calculate_session_breakdown(&record, at("2026-01-15 10:00"), &shift).unwrap();
/// assert_eq!(session.mode, BreakdownMode::Preview);
/// assert_eq!(session.breakdown.early_arrival_overtime_minutes, 60);
/// assert_eq!(session.breakdown.regular_minutes, 60);
/// ```
pub fn calculate_session_breakdown(
    record: &AttendanceRecord,
    now: NaiveDateTime,
    shift: &ResolvedShift,
) -> EngineResult<SessionBreakdown> {
    let (reference_time, mode) = record.reference_time(now);
    validate_work_window(record.check_in, reference_time)?;

    Ok(SessionBreakdown {
        record_id: record.id.clone(),
        mode,
        reference_time,
        breakdown: shift.breakdown(record.check_in, reference_time),
    })
}
