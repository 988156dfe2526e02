//! Request types for the Working-Time Engine API.
//!
//! This module defines the JSON request structures for the `/breakdown` and
//! `/payroll/overtime` endpoints.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, PayPeriod, ShiftConfig};

/// Request body for the `/breakdown` endpoint.
///
/// The shift window comes either from a configured department or inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownRequest {
    /// A configured department whose shift window applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// An inline shift window, instead of a department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<ShiftConfig>,
    /// When the employee checked in.
    pub check_in: NaiveDateTime,
    /// When the employee checked out, if they have.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDateTime>,
    /// The "now" to preview an open session against. Defaults to the
    /// server's local time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDateTime>,
}

/// Where a breakdown request takes its shift window from.
#[derive(Debug, Clone, PartialEq)]
pub enum ShiftSource<'a> {
    /// A configured department.
    Department(&'a str),
    /// A shift window supplied with the request.
    Inline(&'a ShiftConfig),
}

impl BreakdownRequest {
    /// Returns the shift source, or a validation message if the request
    /// names neither or both.
    pub fn shift_source(&self) -> Result<ShiftSource<'_>, &'static str> {
        match (&self.department_id, &self.shift) {
            (Some(department_id), None) => Ok(ShiftSource::Department(department_id)),
            (None, Some(shift)) => Ok(ShiftSource::Inline(shift)),
            (None, None) => Err("either department_id or shift is required"),
            (Some(_), Some(_)) => Err("department_id and shift are mutually exclusive"),
        }
    }
}

/// Request body for the `/payroll/overtime` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee to summarize.
    pub employee_id: String,
    /// The employee's department.
    pub department_id: String,
    /// The employee's base hourly rate.
    pub hourly_rate: Decimal,
    /// Overrides the configured overtime rate multiplier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_multiplier: Option<Decimal>,
    /// The pay period to summarize.
    pub pay_period: PayPeriod,
    /// The employee's attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

impl PayrollRequest {
    /// Checks the request values serde cannot, returning a validation
    /// message for the first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.hourly_rate < Decimal::ZERO {
            return Err(format!("hourly_rate must not be negative (got {})", self.hourly_rate));
        }
        if let Some(multiplier) = self.rate_multiplier {
            if multiplier < Decimal::ZERO {
                return Err(format!("rate_multiplier must not be negative (got {})", multiplier));
            }
        }
        if self.pay_period.end_date < self.pay_period.start_date {
            return Err(format!(
                "pay_period end_date {} is before start_date {}",
                self.pay_period.end_date, self.pay_period.start_date
            ));
        }
        Ok(())
    }
}
