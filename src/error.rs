//! Error types for the Working-Time Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving shift windows
//! and computing working time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifies which end of a department shift window a value belongs to.
///
/// # Example
///
/// ```
/// use worktime_engine::error::ShiftBoundary;
///
/// assert_eq!(ShiftBoundary::Start.to_string(), "shift_start");
/// assert_eq!(ShiftBoundary::End.to_string(), "shift_end");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftBoundary {
    /// The configured start of the shift.
    Start,
    /// The configured end of the shift.
    End,
}

impl std::fmt::Display for ShiftBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftBoundary::Start => write!(f, "shift_start"),
            ShiftBoundary::End => write!(f, "shift_end"),
        }
    }
}

/// Errors raised while parsing a 12-hour time-of-day string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeParseError {
    /// The string does not match the `H:MM AM|PM` pattern.
    #[error("Time '{input}' is not in 12-hour 'H:MM AM|PM' format")]
    Format {
        /// The rejected input.
        input: String,
    },

    /// The string matched the pattern but the hour or minute is out of range.
    #[error("Time '{input}' is out of range: hour must be 1-12 and minute 0-59 (got {hour}:{minute:02})")]
    Range {
        /// The rejected input.
        input: String,
        /// The hour as written.
        hour: u32,
        /// The minute as written.
        minute: u32,
    },
}

/// The main error type for the Working-Time Engine.
///
/// # Example
///
/// ```
/// use worktime_engine::error::EngineError;
///
/// let error = EngineError::DepartmentNotFound {
///     department: "sales".to_string(),
/// };
/// assert_eq!(error.to_string(), "Department not found: sales");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Department id was not found in the configuration.
    #[error("Department not found: {department}")]
    DepartmentNotFound {
        /// The department id that was not found.
        department: String,
    },

    /// A shift boundary in the department configuration is malformed.
    #[error("Invalid shift configuration for {boundary}: {source}")]
    InvalidShiftConfig {
        /// The boundary that failed to parse.
        boundary: ShiftBoundary,
        /// The underlying parse failure.
        #[source]
        source: TimeParseError,
    },

    /// The shift ends before it starts on the same calendar day.
    #[error("Overnight shift window {start} - {end} is not supported")]
    OvernightShift {
        /// The configured shift start.
        start: String,
        /// The configured shift end.
        end: String,
    },

    /// The reference time is earlier than the check-in time.
    #[error("Invalid work window: reference time {reference_now} is before check-in {check_in}")]
    InvalidWorkWindow {
        /// The check-in timestamp.
        check_in: NaiveDateTime,
        /// The offending reference timestamp.
        reference_now: NaiveDateTime,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Returns true if the error stems from malformed department shift data
    /// rather than from the calculation inputs.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidShiftConfig { .. } | EngineError::OvernightShift { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
