//! Shift window resolution.
//!
//! A [`ResolvedShift`] is a department [`ShiftConfig`] whose boundary strings
//! have been parsed once. Configuration loading keeps one per department so
//! repeated breakdowns (e.g. a live preview refreshing every second) never
//! re-parse the same strings.

use chrono::{NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::config::InvalidShiftPolicy;
use crate::error::{EngineError, EngineResult, ShiftBoundary};
use crate::models::{ShiftConfig, WorkBreakdown, WorkWindow};

use super::time_of_day::{default_boundary_time, format_clock_time, parse_clock_time};
use super::work_breakdown::breakdown_for_window;

/// A shift window with parsed boundaries.
///
/// The window never wraps past midnight: `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedShift {
    /// Shift start as a time of day.
    pub start: NaiveTime,
    /// Shift end as a time of day.
    pub end: NaiveTime,
    /// Nominal working hours per day. Displayed only.
    pub nominal_hours: Decimal,
    /// Reserved overtime grace threshold in minutes. Not applied.
    pub overtime_grace_minutes: u32,
}

impl ResolvedShift {
    /// Parses both boundaries of `shift`, failing on the first malformed one.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidShiftConfig`] naming the malformed boundary
    /// - [`EngineError::OvernightShift`] if the end is before the start
    ///
    /// # Example
    ///
    /// ```
    /// use worktime_engine::calculation::ResolvedShift;
    /// use worktime_engine::models::ShiftConfig;
    /// use chrono::NaiveTime;
    /// use rust_decimal::Decimal;
    ///
    /// let shift = ShiftConfig::new("9:00 AM", "6:00 PM", Decimal::new(9, 0));
    /// let resolved = ResolvedShift::from_config(&shift).unwrap();
    /// assert_eq!(resolved.start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    /// assert_eq!(resolved.end, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    ///
    /// let broken = ShiftConfig::new("25:99 AM", "6:00 PM", Decimal::new(9, 0));
    /// assert!(ResolvedShift::from_config(&broken).unwrap_err().is_configuration_error());
    /// ```
    pub fn from_config(shift: &ShiftConfig) -> EngineResult<Self> {
        let start = parse_boundary(&shift.shift_start, ShiftBoundary::Start)?;
        let end = parse_boundary(&shift.shift_end, ShiftBoundary::End)?;
        Self::from_times(start, end, shift)
    }

    /// Parses `shift` under an explicit policy for malformed boundaries.
    ///
    /// With [`InvalidShiftPolicy::UseDefaults`] a malformed start becomes
    /// 9:00 AM and a malformed end 6:00 PM; each substitution is logged.
    /// An overnight window is rejected under either policy.
    pub fn resolve(shift: &ShiftConfig, policy: InvalidShiftPolicy) -> EngineResult<Self> {
        match policy {
            InvalidShiftPolicy::Reject => Self::from_config(shift),
            InvalidShiftPolicy::UseDefaults => {
                let start = parse_boundary_or_default(&shift.shift_start, ShiftBoundary::Start);
                let end = parse_boundary_or_default(&shift.shift_end, ShiftBoundary::End);
                Self::from_times(start, end, shift)
            }
        }
    }

    fn from_times(start: NaiveTime, end: NaiveTime, shift: &ShiftConfig) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::OvernightShift {
                start: shift.shift_start.clone(),
                end: shift.shift_end.clone(),
            });
        }

        Ok(Self {
            start,
            end,
            nominal_hours: shift.nominal_hours,
            overtime_grace_minutes: shift.overtime_grace_minutes,
        })
    }

    /// Anchors the shift onto the calendar day of `check_in`.
    ///
    /// The day of `reference_now` is not used: a session that
    /// runs past midnight is still measured against the check-in day.
    pub fn window(&self, check_in: NaiveDateTime, reference_now: NaiveDateTime) -> WorkWindow {
        let day = check_in.date();
        WorkWindow {
            check_in,
            reference_now,
            shift_start_absolute: day.and_time(self.start),
            shift_end_absolute: day.and_time(self.end),
        }
    }

    /// Computes the working-time breakdown for one interval.
    pub fn breakdown(
        &self,
        check_in: NaiveDateTime,
        reference_now: NaiveDateTime,
    ) -> WorkBreakdown {
        breakdown_for_window(&self.window(check_in, reference_now))
    }

    /// The shift start in 12-hour display form.
    pub fn display_start(&self) -> String {
        format_clock_time(self.start)
    }

    /// The shift end in 12-hour display form.
    pub fn display_end(&self) -> String {
        format_clock_time(self.end)
    }
}

fn parse_boundary(input: &str, boundary: ShiftBoundary) -> EngineResult<NaiveTime> {
    parse_clock_time(input).map_err(|source| EngineError::InvalidShiftConfig { boundary, source })
}

fn parse_boundary_or_default(input: &str, boundary: ShiftBoundary) -> NaiveTime {
    match parse_clock_time(input) {
        Ok(time) => time,
        Err(err) => {
            let fallback = default_boundary_time(boundary);
            warn!(
                boundary = %boundary,
                input = %input,
                error = %err,
                fallback = %format_clock_time(fallback),
                "Substituting default shift boundary"
            );
            fallback
        }
    }
}
