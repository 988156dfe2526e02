//! Calculation logic for the Working-Time Engine.
//!
//! This module contains the 12-hour time-of-day parser, shift window
//! resolution, the regular/overtime breakdown of an attendance interval,
//! attendance session breakdowns (live preview or finalized), and the
//! overtime payroll summary for a pay period.

mod overtime_pay;
mod session;
mod shift_window;
mod time_of_day;
mod work_breakdown;

pub use overtime_pay::{DailyOvertime, OvertimeSummary, summarize_overtime};
pub use session::{SessionBreakdown, calculate_session_breakdown};
pub use shift_window::ResolvedShift;
pub use time_of_day::{
    default_boundary_time, format_clock_time, parse_clock_time, parse_time_of_day,
};
pub use work_breakdown::{
    breakdown_for_window, compute_work_breakdown, floor_minutes, validate_work_window,
};
