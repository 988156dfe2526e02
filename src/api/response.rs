//! Response types for the Working-Time Engine API.
//!
//! This module defines the success bodies of both endpoints, the error
//! response structures, and the mapping from [`EngineError`] to HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{OvertimeSummary, ResolvedShift};
use crate::error::EngineError;
use crate::models::{BreakdownMode, FormattedBreakdown, WorkBreakdown};

/// The shift window a breakdown was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSummary {
    /// Shift start, e.g. "9:00 AM".
    pub shift_start: String,
    /// Shift end, e.g. "6:00 PM".
    pub shift_end: String,
    /// Nominal working hours per day.
    pub nominal_hours: Decimal,
}

impl From<&ResolvedShift> for ShiftSummary {
    fn from(shift: &ResolvedShift) -> Self {
        Self {
            shift_start: shift.display_start(),
            shift_end: shift.display_end(),
            nominal_hours: shift.nominal_hours,
        }
    }
}

/// Response body for the `/breakdown` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownResponse {
    /// The department the shift came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    /// Preview while checked in, final once checked out.
    pub mode: BreakdownMode,
    /// The check-in time.
    pub check_in: NaiveDateTime,
    /// The time the breakdown was computed against.
    pub reference_time: NaiveDateTime,
    /// The shift window applied.
    pub shift: ShiftSummary,
    /// The computed minutes.
    pub breakdown: WorkBreakdown,
    /// The computed minutes as "{h}h {m}m" strings.
    pub formatted: FormattedBreakdown,
}

/// Response body for the `/payroll/overtime` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// The department whose shift applied.
    pub department_id: String,
    /// The overtime summary.
    pub summary: OvertimeSummary,
    /// Calculation time in microseconds.
    pub duration_us: u64,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a department not found error response.
    pub fn department_not_found(department: &str) -> Self {
        Self::with_details(
            "DEPARTMENT_NOT_FOUND",
            format!("Department not found: {}", department),
            format!("The department '{}' is not configured", department),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with a `VALIDATION_ERROR` body.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::DepartmentNotFound { department } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::department_not_found(&department),
            },
            EngineError::InvalidShiftConfig { boundary, .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "INVALID_SHIFT_CONFIG",
                    message,
                    format!("{} must look like \"9:00 AM\" or \"6:30 PM\"", boundary),
                ),
            },
            EngineError::OvernightShift { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "OVERNIGHT_SHIFT_UNSUPPORTED",
                    message,
                    "The shift end must not be earlier than the shift start",
                ),
            },
            EngineError::InvalidWorkWindow { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_WORK_WINDOW",
                    message,
                    "The check-out (or as_of) time must not be earlier than the check-in time",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message,
                ),
            },
        }
    }
}
