//! Department shift configuration model.
//!
//! This module defines the [`ShiftConfig`] struct describing a department's
//! standard working window as configured by HR.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A department's configured shift window.
///
/// The boundaries are kept exactly as configured (12-hour clock strings such
/// as `"9:00 AM"`); they are parsed when a window is resolved so that
/// malformed data surfaces as a configuration error at that point.
///
/// # Example
///
/// ```
/// use worktime_engine::models::ShiftConfig;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftConfig {
///     shift_start: "9:00 AM".to_string(),
///     shift_end: "6:00 PM".to_string(),
///     nominal_hours: Decimal::new(9, 0),
///     overtime_grace_minutes: 15,
/// };
/// assert_eq!(shift.shift_start, "9:00 AM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Shift start as a 12-hour time of day (e.g. "9:00 AM").
    pub shift_start: String,
    /// Shift end as a 12-hour time of day (e.g. "6:00 PM").
    pub shift_end: String,
    /// Nominal working hours per day. Displayed only.
    pub nominal_hours: Decimal,
    /// Overtime grace threshold in minutes.
    ///
    /// Reserved: carried through configuration and responses but not
    /// applied by the working-time calculation.
    #[serde(default)]
    pub overtime_grace_minutes: u32,
}

impl ShiftConfig {
    /// Creates a shift configuration with no grace threshold.
    pub fn new(
        shift_start: impl Into<String>,
        shift_end: impl Into<String>,
        nominal_hours: Decimal,
    ) -> Self {
        Self {
            shift_start: shift_start.into(),
            shift_end: shift_end.into(),
            nominal_hours,
            overtime_grace_minutes: 0,
        }
    }
}
