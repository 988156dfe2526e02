//! HTTP request handlers for the Working-Time Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Local, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{ResolvedShift, summarize_overtime, validate_work_window};
use crate::error::EngineError;
use crate::models::BreakdownMode;

use super::request::{BreakdownRequest, PayrollRequest, ShiftSource};
use super::response::{
    ApiError, ApiErrorResponse, BreakdownResponse, PayrollResponse, ShiftSummary,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/breakdown", post(breakdown_handler))
        .route("/payroll/overtime", post(payroll_overtime_handler))
        .with_state(state)
}

/// Handler for POST /breakdown endpoint.
///
/// Computes the regular/overtime breakdown of one attendance interval: a
/// live preview while the employee is still checked in, the final figures
/// once a check-out is given.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let source = match request.shift_source() {
        Ok(source) => source,
        Err(message) => {
            warn!(correlation_id = %correlation_id, error = message, "Invalid breakdown request");
            return ApiErrorResponse::validation(message).into_response();
        }
    };

    let inline_shift;
    let (department_id, shift) = match source {
        ShiftSource::Department(id) => match state.config().resolved_shift(id) {
            Ok(shift) => (Some(id.to_string()), shift),
            Err(err) => return engine_error_response(err, correlation_id),
        },
        ShiftSource::Inline(config) => match ResolvedShift::from_config(config) {
            Ok(resolved) => {
                inline_shift = resolved;
                (None, &inline_shift)
            }
            Err(err) => return engine_error_response(err, correlation_id),
        },
    };

    let (reference_time, mode) = match request.check_out {
        Some(check_out) => (check_out, BreakdownMode::Final),
        None => (
            request
                .as_of
                .unwrap_or_else(|| Local::now().naive_local()),
            BreakdownMode::Preview,
        ),
    };

    if let Err(err) = validate_work_window(request.check_in, reference_time) {
        return engine_error_response(err, correlation_id);
    }

    let breakdown = shift.breakdown(request.check_in, reference_time);

    info!(
        correlation_id = %correlation_id,
        department_id = department_id.as_deref().unwrap_or("inline"),
        mode = ?mode,
        regular_minutes = breakdown.regular_minutes,
        overtime_minutes = breakdown.overtime_minutes,
        "Breakdown completed successfully"
    );

    json_response(BreakdownResponse {
        department_id,
        mode,
        check_in: request.check_in,
        reference_time,
        shift: ShiftSummary::from(shift),
        formatted: breakdown.formatted(),
        breakdown,
    })
}

/// Handler for POST /payroll/overtime endpoint.
///
/// Summarizes an employee's overtime and overtime pay for a pay period.
async fn payroll_overtime_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overtime payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    if let Err(message) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %message, "Invalid payroll request");
        return ApiErrorResponse::validation(message).into_response();
    }

    let config = state.config();
    let shift = match config.resolved_shift(&request.department_id) {
        Ok(shift) => shift,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                department_id = %request.department_id,
                "Department not found"
            );
            return engine_error_response(err, correlation_id);
        }
    };
    let rate_multiplier = request
        .rate_multiplier
        .unwrap_or_else(|| config.overtime_rate_multiplier());

    let start_time = Instant::now();
    let summary = match summarize_overtime(
        &request.employee_id,
        &request.attendance,
        &request.pay_period,
        shift,
        request.hourly_rate,
        rate_multiplier,
        1,
    ) {
        Ok(summary) => summary,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        records_count = request.attendance.len(),
        overtime_minutes = summary.total_overtime_minutes,
        overtime_pay = %summary.overtime_pay,
        warnings = summary.warnings.len(),
        duration_us = duration.as_micros(),
        "Overtime payroll completed successfully"
    );

    json_response(PayrollResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        department_id: request.department_id,
        summary,
        duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
    })
}

fn json_response<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Maps a JSON extraction failure onto the API error codes.
fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}
