//! Core data models for the Working-Time Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod pay_period;
mod shift_config;
mod work_breakdown;

pub use attendance::{AttendanceRecord, BreakdownMode};
pub use audit::{AuditStep, AuditWarning};
pub use pay_period::PayPeriod;
pub use shift_config::ShiftConfig;
pub use work_breakdown::{FormattedBreakdown, WorkBreakdown, WorkWindow, format_minutes};
