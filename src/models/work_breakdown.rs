//! Working-time breakdown models.
//!
//! This module contains the [`WorkWindow`] describing one resolved attendance
//! interval and the [`WorkBreakdown`] produced for it, together with the
//! `"{h}h {m}m"` display formatting used by attendance screens.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An attendance interval with its shift window resolved onto the
/// calendar day of check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkWindow {
    /// When the employee checked in.
    pub check_in: NaiveDateTime,
    /// The as-of time: "now" for a live preview, the check-out otherwise.
    pub reference_now: NaiveDateTime,
    /// Shift start on the check-in day.
    pub shift_start_absolute: NaiveDateTime,
    /// Shift end on the check-in day.
    pub shift_end_absolute: NaiveDateTime,
}

/// Regular and overtime minutes worked for one attendance interval.
///
/// # Example
///
/// ```
/// use worktime_engine::models::WorkBreakdown;
///
/// let breakdown = WorkBreakdown::from_parts(540, 60, 30);
/// assert_eq!(breakdown.overtime_minutes, 90);
/// assert_eq!(breakdown.total_minutes, 630);
/// assert!(breakdown.is_overtime);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkBreakdown {
    /// Minutes worked inside the shift window.
    pub regular_minutes: i64,
    /// Minutes worked before the shift start.
    pub early_arrival_overtime_minutes: i64,
    /// Minutes worked after the shift end.
    pub late_departure_overtime_minutes: i64,
    /// Early arrival plus late departure minutes.
    pub overtime_minutes: i64,
    /// Regular plus overtime minutes.
    pub total_minutes: i64,
    /// Whether any overtime has been worked.
    pub is_overtime: bool,
}

impl WorkBreakdown {
    /// Builds a breakdown from its three independent components, deriving
    /// the totals and the overtime flag.
    pub fn from_parts(regular: i64, early_arrival: i64, late_departure: i64) -> Self {
        let overtime_minutes = early_arrival + late_departure;
        Self {
            regular_minutes: regular,
            early_arrival_overtime_minutes: early_arrival,
            late_departure_overtime_minutes: late_departure,
            overtime_minutes,
            total_minutes: regular + overtime_minutes,
            is_overtime: overtime_minutes > 0,
        }
    }

    /// Overtime converted to hours (minutes / 60).
    ///
    /// # Example
    ///
    /// ```
    /// use worktime_engine::models::WorkBreakdown;
    /// use rust_decimal::Decimal;
    ///
    /// let breakdown = WorkBreakdown::from_parts(540, 90, 0);
    /// assert_eq!(breakdown.overtime_hours(), Decimal::new(15, 1));
    /// ```
    pub fn overtime_hours(&self) -> Decimal {
        Decimal::from(self.overtime_minutes) / Decimal::from(60)
    }

    /// Renders every component as `"{h}h {m}m"`.
    pub fn formatted(&self) -> FormattedBreakdown {
        FormattedBreakdown {
            regular: format_minutes(self.regular_minutes),
            early_arrival_overtime: format_minutes(self.early_arrival_overtime_minutes),
            late_departure_overtime: format_minutes(self.late_departure_overtime_minutes),
            overtime: format_minutes(self.overtime_minutes),
            total: format_minutes(self.total_minutes),
        }
    }
}

/// Display strings for a [`WorkBreakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedBreakdown {
    /// Regular time, e.g. "9h 0m".
    pub regular: String,
    /// Early arrival overtime.
    pub early_arrival_overtime: String,
    /// Late departure overtime.
    pub late_departure_overtime: String,
    /// Total overtime.
    pub overtime: String,
    /// Total time worked.
    pub total: String,
}

/// Formats a minute count as `"{h}h {m}m"`.
///
/// # Example
///
/// ```
/// use worktime_engine::models::format_minutes;
///
/// assert_eq!(format_minutes(0), "0h 0m");
/// assert_eq!(format_minutes(90), "1h 30m");
/// assert_eq!(format_minutes(720), "12h 0m");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    format!("{}h {}m", minutes.div_euclid(60), minutes.rem_euclid(60))
}
