//! Working-time breakdown calculation.
//!
//! This module splits an attendance interval into regular minutes (inside the
//! department shift window) and overtime minutes (early arrival before the
//! window, late departure after it).
//!
//! ## Rules
//!
//! With `S`/`E` the shift start/end on the check-in day:
//! - early arrival = whole minutes from check-in to `S`, if check-in is before `S`
//! - late departure = whole minutes from `E` to the reference time, if it is after `E`
//! - regular = whole minutes of `[max(check-in, S), min(reference, E)]`, never negative
//!
//! The early window is cut off at the reference time and the late window
//! starts no earlier than check-in, so a session entirely outside the shift
//! is counted once. The three windows are disjoint and cover the session.

use chrono::{Duration, NaiveDateTime};

use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftConfig, WorkBreakdown, WorkWindow};

use super::shift_window::ResolvedShift;

/// Computes the working-time breakdown for one attendance interval.
///
/// `reference_now` is either the current time (live preview while still
/// checked in) or the check-out time (finalized record). The shift window is
/// resolved onto the calendar day of `check_in`.
///
/// # Preconditions
///
/// `reference_now >= check_in`. A violation is not detected here; every
/// component still comes out non-negative. Use [`validate_work_window`] at
/// the boundary where the timestamps are accepted.
///
/// # Errors
///
/// Returns a configuration error ([`EngineError::InvalidShiftConfig`] or
/// [`EngineError::OvernightShift`]) if the shift strings are malformed.
///
/// # Examples
///
/// ```
/// use worktime_engine::calculation::compute_work_breakdown;
/// use worktime_engine::models::ShiftConfig;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let shift = ShiftConfig::new("9:00 AM", "6:00 PM", Decimal::new(9, 0));
///
/// let breakdown =
///     compute_work_breakdown(at("2026-01-15 07:30"), at("2026-01-15 19:30"), &shift).unwrap();
///
/// assert_eq!(breakdown.early_arrival_overtime_minutes, 90);
/// assert_eq!(breakdown.late_departure_overtime_minutes, 90);
/// assert_eq!(breakdown.regular_minutes, 540);
/// assert_eq!(breakdown.total_minutes, 720);
/// assert!(breakdown.is_overtime);
/// ```
pub fn compute_work_breakdown(
    check_in: NaiveDateTime,
    reference_now: NaiveDateTime,
    shift: &ShiftConfig,
) -> EngineResult<WorkBreakdown> {
    let resolved = ResolvedShift::from_config(shift)?;
    Ok(resolved.breakdown(check_in, reference_now))
}

/// Computes the breakdown for an already resolved window.
pub fn breakdown_for_window(window: &WorkWindow) -> WorkBreakdown {
    let WorkWindow {
        check_in,
        reference_now,
        shift_start_absolute: shift_start,
        shift_end_absolute: shift_end,
    } = *window;

    let early_arrival = if check_in < shift_start {
        floor_minutes(shift_start.min(reference_now) - check_in).max(0)
    } else {
        0
    };

    let late_departure = if reference_now > shift_end {
        floor_minutes(reference_now - shift_end.max(check_in)).max(0)
    } else {
        0
    };

    let work_start = check_in.max(shift_start);
    let work_end = reference_now.min(shift_end);
    let regular = floor_minutes(work_end - work_start).max(0);

    WorkBreakdown::from_parts(regular, early_arrival, late_departure)
}

/// Whole minutes in `duration`, truncated toward zero.
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::floor_minutes;
/// use chrono::Duration;
///
/// assert_eq!(floor_minutes(Duration::seconds(119)), 1);
/// assert_eq!(floor_minutes(Duration::seconds(-119)), -1);
/// ```
pub fn floor_minutes(duration: Duration) -> i64 {
    duration.num_minutes()
}

/// Rejects a reference time earlier than the check-in time.
pub fn validate_work_window(
    check_in: NaiveDateTime,
    reference_now: NaiveDateTime,
) -> EngineResult<()> {
    if reference_now < check_in {
        return Err(EngineError::InvalidWorkWindow {
            check_in,
            reference_now,
        });
    }
    Ok(())
}
