//! Integration tests for the Working-Time Engine.
//!
//! This test suite drives the HTTP API end to end and covers:
//! - Finalized breakdowns for configured departments
//! - Live previews against an explicit `as_of` and against the clock
//! - Inline shift windows
//! - Overtime payroll summaries
//! - Error cases

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use worktime_engine::api::{create_router, AppState};
use worktime_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_breakdown(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/breakdown", body).await
}

async fn post_payroll(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/payroll/overtime", body).await
}

fn finalized(department_id: &str, check_in: &str, check_out: &str) -> Value {
    json!({
        "department_id": department_id,
        "check_in": check_in,
        "check_out": check_out
    })
}

fn create_attendance(id: &str, check_in: &str, check_out: Option<&str>) -> Value {
    json!({
        "id": id,
        "employee_id": "emp_001",
        "check_in": check_in,
        "check_out": check_out
    })
}

fn create_payroll_request(attendance: Vec<Value>) -> Value {
    json!({
        "employee_id": "emp_001",
        "department_id": "engineering",
        "hourly_rate": "30.00",
        "pay_period": {
            "start_date": "2026-01-12",
            "end_date": "2026-01-18"
        },
        "attendance": attendance
    })
}

fn assert_minutes(result: &Value, regular: i64, early: i64, late: i64) {
    let breakdown = &result["breakdown"];
    assert_eq!(breakdown["regular_minutes"], regular, "regular_minutes");
    assert_eq!(breakdown["early_arrival_overtime_minutes"], early, "early arrival");
    assert_eq!(breakdown["late_departure_overtime_minutes"], late, "late departure");
    assert_eq!(breakdown["overtime_minutes"], early + late, "overtime_minutes");
    assert_eq!(breakdown["total_minutes"], regular + early + late, "total_minutes");
    assert_eq!(breakdown["is_overtime"], early + late > 0, "is_overtime");
}

// =============================================================================
// SECTION 1: Finalized Breakdowns (engineering, 9:00 AM - 6:00 PM)
// =============================================================================

#[tokio::test]
async fn test_early_arrival_leaves_at_shift_end() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T08:00:00", "2026-01-13T18:00:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["mode"], "final");
    assert_minutes(&result, 540, 60, 0);
}

#[tokio::test]
async fn test_on_time_stays_two_hours_late() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T09:00:00", "2026-01-13T20:00:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 540, 0, 120);
}

#[tokio::test]
async fn test_early_and_late() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T07:30:00", "2026-01-13T19:30:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 540, 90, 90);
    assert_eq!(result["formatted"]["early_arrival_overtime"], "1h 30m");
    assert_eq!(result["formatted"]["overtime"], "3h 0m");
    assert_eq!(result["formatted"]["total"], "12h 0m");
}

#[tokio::test]
async fn test_exact_shift_window_has_no_overtime() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T09:00:00", "2026-01-13T18:00:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 540, 0, 0);
    assert_eq!(result["formatted"]["overtime"], "0h 0m");
}

#[tokio::test]
async fn test_short_day_inside_window() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T10:00:00", "2026-01-13T14:30:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 270, 0, 0);
}

#[tokio::test]
async fn test_session_entirely_before_shift() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T06:00:00", "2026-01-13T08:00:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 0, 120, 0);
}

#[tokio::test]
async fn test_session_past_midnight_uses_check_in_day() {
    let (status, result) =
        post_breakdown(finalized("engineering", "2026-01-13T17:00:00", "2026-01-14T01:00:00"))
            .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 60, 0, 420);
}

#[tokio::test]
async fn test_department_shift_echoed() {
    let (status, result) = post_breakdown(finalized(
        "field_operations",
        "2026-01-13T08:00:00",
        "2026-01-13T17:30:00",
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["department_id"], "field_operations");
    assert_eq!(result["shift"]["shift_start"], "8:00 AM");
    assert_eq!(result["shift"]["shift_end"], "5:30 PM");
    assert_eq!(normalize_decimal(result["shift"]["nominal_hours"].as_str().unwrap()), "8.5");
    assert_minutes(&result, 570, 0, 0);
}

// =============================================================================
// SECTION 2: Live Previews
// =============================================================================

#[tokio::test]
async fn test_preview_against_as_of() {
    let (status, result) = post_breakdown(json!({
        "department_id": "engineering",
        "check_in": "2026-01-13T08:15:00",
        "as_of": "2026-01-13T12:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["mode"], "preview");
    assert_eq!(result["reference_time"], "2026-01-13T12:00:00");
    assert_minutes(&result, 180, 45, 0);
}

#[tokio::test]
async fn test_check_out_wins_over_as_of() {
    let (status, result) = post_breakdown(json!({
        "department_id": "engineering",
        "check_in": "2026-01-13T09:00:00",
        "check_out": "2026-01-13T18:30:00",
        "as_of": "2026-01-13T12:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["mode"], "final");
    assert_minutes(&result, 540, 0, 30);
}

#[tokio::test]
async fn test_preview_defaults_to_current_time() {
    // A check-in far in the past keeps the clock-based preview valid
    let (status, result) = post_breakdown(json!({
        "department_id": "engineering",
        "check_in": "2020-01-01T08:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["mode"], "preview");
    assert_eq!(result["breakdown"]["early_arrival_overtime_minutes"], 60);
    assert_eq!(result["breakdown"]["regular_minutes"], 540);
    assert_eq!(result["breakdown"]["is_overtime"], true);
}

#[tokio::test]
async fn test_repeated_previews_are_identical() {
    let body = json!({
        "department_id": "engineering",
        "check_in": "2026-01-13T08:00:00",
        "as_of": "2026-01-13T19:00:00"
    });

    let (_, first) = post_breakdown(body.clone()).await;
    let (_, second) = post_breakdown(body).await;

    assert_eq!(first["breakdown"], second["breakdown"]);
}

// =============================================================================
// SECTION 3: Inline Shift Windows
// =============================================================================

#[tokio::test]
async fn test_inline_shift() {
    let (status, result) = post_breakdown(json!({
        "shift": {
            "shift_start": "6:00 am",
            "shift_end": "2:00 pm",
            "nominal_hours": "8"
        },
        "check_in": "2026-01-13T05:30:00",
        "check_out": "2026-01-13T14:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(result.get("department_id").is_none());
    assert_eq!(result["shift"]["shift_start"], "6:00 AM");
    assert_minutes(&result, 480, 30, 0);
}

#[tokio::test]
async fn test_inline_shift_noon_and_midnight_boundaries() {
    let (status, result) = post_breakdown(json!({
        "shift": {
            "shift_start": "12:00 AM",
            "shift_end": "12:00 PM",
            "nominal_hours": "12"
        },
        "check_in": "2026-01-13T00:00:00",
        "check_out": "2026-01-13T13:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_minutes(&result, 720, 0, 60);
}

#[tokio::test]
async fn test_inline_shift_malformed_start() {
    let (status, error) = post_breakdown(json!({
        "shift": {
            "shift_start": "25:99 AM",
            "shift_end": "6:00 PM",
            "nominal_hours": "9"
        },
        "check_in": "2026-01-13T09:00:00",
        "check_out": "2026-01-13T18:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_SHIFT_CONFIG");
    assert!(error["message"].as_str().unwrap().contains("shift_start"));
}

#[tokio::test]
async fn test_inline_shift_24_hour_format_rejected() {
    let (status, error) = post_breakdown(json!({
        "shift": {
            "shift_start": "9:00 AM",
            "shift_end": "18:00",
            "nominal_hours": "9"
        },
        "check_in": "2026-01-13T09:00:00",
        "check_out": "2026-01-13T18:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "INVALID_SHIFT_CONFIG");
    assert!(error["message"].as_str().unwrap().contains("shift_end"));
}

#[tokio::test]
async fn test_inline_overnight_shift_rejected() {
    let (status, error) = post_breakdown(json!({
        "shift": {
            "shift_start": "10:00 PM",
            "shift_end": "6:00 AM",
            "nominal_hours": "8"
        },
        "check_in": "2026-01-13T22:00:00",
        "check_out": "2026-01-14T06:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["code"], "OVERNIGHT_SHIFT_UNSUPPORTED");
}

// =============================================================================
// SECTION 4: Overtime Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_single_day() {
    let (status, result) = post_payroll(create_payroll_request(vec![create_attendance(
        "att_001",
        "2026-01-13T08:00:00",
        Some("2026-01-13T19:00:00"),
    )]))
    .await;

    assert_eq!(status, StatusCode::OK);
    let summary = &result["summary"];
    assert_eq!(summary["total_overtime_minutes"], 120);
    assert_eq!(summary["total_regular_minutes"], 540);
    // 2 hours × $30.00 at the configured flat rate = $60.00
    assert_eq!(normalize_decimal(summary["overtime_pay"].as_str().unwrap()), "60");
    assert_eq!(normalize_decimal(summary["rate_multiplier"].as_str().unwrap()), "1");
}

#[tokio::test]
async fn test_payroll_week_of_sessions() {
    let (status, result) = post_payroll(create_payroll_request(vec![
        create_attendance("att_001", "2026-01-12T08:30:00", Some("2026-01-12T18:00:00")),
        create_attendance("att_002", "2026-01-13T09:00:00", Some("2026-01-13T18:45:00")),
        create_attendance("att_003", "2026-01-14T09:00:00", Some("2026-01-14T12:00:00")),
        create_attendance("att_004", "2026-01-14T13:00:00", Some("2026-01-14T18:15:00")),
        create_attendance("att_005", "2026-01-19T07:00:00", Some("2026-01-19T20:00:00")),
    ]))
    .await;

    assert_eq!(status, StatusCode::OK);
    let summary = &result["summary"];
    let days = summary["days"].as_array().unwrap();

    // 2026-01-19 falls outside the pay period
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"], "2026-01-12");
    assert_eq!(days[0]["overtime_minutes"], 30);
    assert_eq!(days[1]["overtime_minutes"], 45);
    assert_eq!(days[2]["sessions"], 2);
    assert_eq!(days[2]["regular_minutes"], 180 + 300);
    assert_eq!(days[2]["overtime_minutes"], 15);

    // 90 minutes = 1.5 hours × $30.00 = $45.00
    assert_eq!(summary["total_overtime_minutes"], 90);
    assert_eq!(normalize_decimal(summary["overtime_pay"].as_str().unwrap()), "45");
}

#[tokio::test]
async fn test_payroll_open_session_warned() {
    let (status, result) = post_payroll(create_payroll_request(vec![
        create_attendance("att_001", "2026-01-13T08:00:00", Some("2026-01-13T18:00:00")),
        create_attendance("att_002", "2026-01-14T08:00:00", None),
    ]))
    .await;

    assert_eq!(status, StatusCode::OK);
    let warnings = result["summary"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "OPEN_SESSION");
    assert_eq!(result["summary"]["total_overtime_minutes"], 60);
}

#[tokio::test]
async fn test_payroll_rate_multiplier_override() {
    let mut request = create_payroll_request(vec![create_attendance(
        "att_001",
        "2026-01-13T09:00:00",
        Some("2026-01-13T19:00:00"),
    )]);
    request["rate_multiplier"] = json!("1.5");

    let (status, result) = post_payroll(request).await;

    assert_eq!(status, StatusCode::OK);
    // 1 hour × $30.00 × 1.5 = $45.00
    assert_eq!(
        normalize_decimal(result["summary"]["overtime_pay"].as_str().unwrap()),
        "45"
    );
    assert_eq!(
        normalize_decimal(result["summary"]["rate_multiplier"].as_str().unwrap()),
        "1.5"
    );
}

#[tokio::test]
async fn test_payroll_audit_steps() {
    let (status, result) = post_payroll(create_payroll_request(vec![
        create_attendance("att_001", "2026-01-13T08:00:00", Some("2026-01-13T18:00:00")),
        create_attendance("att_002", "2026-01-14T09:00:00", Some("2026-01-14T19:00:00")),
    ]))
    .await;

    assert_eq!(status, StatusCode::OK);
    let steps = result["summary"]["audit_steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);

    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"], index as u64 + 1);
        assert!(step["rule_name"].is_string());
        assert!(step["reasoning"].is_string());
    }
    assert_eq!(steps[0]["rule_id"], "work_breakdown");
    assert_eq!(steps[2]["rule_id"], "overtime_pay");
}

#[tokio::test]
async fn test_payroll_response_fields() {
    let (status, result) = post_payroll(create_payroll_request(vec![])).await;

    assert_eq!(status, StatusCode::OK);
    assert!(result["calculation_id"].is_string());
    assert!(result["timestamp"].is_string());
    assert!(result["engine_version"].is_string());
    assert!(result["duration_us"].is_number());
    assert_eq!(result["department_id"], "engineering");
    assert_eq!(result["summary"]["employee_id"], "emp_001");
    assert!(result["summary"]["days"].as_array().unwrap().is_empty());
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();

    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/breakdown")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_check_in() {
    let (status, error) = post_breakdown(json!({
        "department_id": "engineering",
        "check_out": "2026-01-13T18:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_invalid_timestamp() {
    let (status, error) = post_breakdown(json!({
        "department_id": "engineering",
        "check_in": "yesterday morning",
        "check_out": "2026-01-13T18:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_unknown_department() {
    let (status, error) =
        post_breakdown(finalized("sales", "2026-01-13T08:00:00", "2026-01-13T18:00:00")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "DEPARTMENT_NOT_FOUND");
}

#[tokio::test]
async fn test_error_check_out_before_check_in() {
    let (status, error) =
        post_breakdown(finalized("engineering", "2026-01-13T18:00:00", "2026-01-13T08:00:00"))
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_WORK_WINDOW");
}

#[tokio::test]
async fn test_error_as_of_before_check_in() {
    let (status, error) = post_breakdown(json!({
        "department_id": "engineering",
        "check_in": "2026-01-13T10:00:00",
        "as_of": "2026-01-13T09:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_WORK_WINDOW");
}

#[tokio::test]
async fn test_error_both_department_and_shift() {
    let (status, error) = post_breakdown(json!({
        "department_id": "engineering",
        "shift": {
            "shift_start": "9:00 AM",
            "shift_end": "6:00 PM",
            "nominal_hours": "9"
        },
        "check_in": "2026-01-13T09:00:00",
        "check_out": "2026-01-13T18:00:00"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_payroll_negative_rate() {
    let mut request = create_payroll_request(vec![]);
    request["hourly_rate"] = json!("-5.00");

    let (status, error) = post_payroll(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_payroll_inverted_record() {
    let (status, error) = post_payroll(create_payroll_request(vec![create_attendance(
        "att_001",
        "2026-01-13T18:00:00",
        Some("2026-01-13T08:00:00"),
    )]))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_WORK_WINDOW");
}

#[tokio::test]
async fn test_error_payroll_missing_pay_period() {
    let (status, error) = post_payroll(json!({
        "employee_id": "emp_001",
        "department_id": "engineering",
        "hourly_rate": "30.00",
        "attendance": []
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("missing field"));
}
