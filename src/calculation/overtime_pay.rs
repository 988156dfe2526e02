//! Overtime payroll summary.
//!
//! Rolls the breakdowns of an employee's closed attendance sessions within a
//! pay period up into per-day lines and a single overtime payment.
//!
//! ## Rate Structure
//!
//! All overtime minutes (early arrival and late departure) are paid at one
//! rate: `overtime hours × hourly rate × multiplier`, rounded to cents with
//! midpoints away from zero.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AuditStep, AuditWarning, PayPeriod, format_minutes};

use super::session::calculate_session_breakdown;
use super::shift_window::ResolvedShift;

/// Worked minutes for one calendar day, summed over its sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyOvertime {
    /// The check-in day the sessions are attributed to.
    pub date: NaiveDate,
    /// Number of closed sessions counted for the day.
    pub sessions: u32,
    /// Minutes inside the shift window.
    pub regular_minutes: i64,
    /// Minutes before the shift start.
    pub early_arrival_overtime_minutes: i64,
    /// Minutes after the shift end.
    pub late_departure_overtime_minutes: i64,
    /// Early arrival plus late departure minutes.
    pub overtime_minutes: i64,
}

impl DailyOvertime {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sessions: 0,
            regular_minutes: 0,
            early_arrival_overtime_minutes: 0,
            late_departure_overtime_minutes: 0,
            overtime_minutes: 0,
        }
    }
}

/// The overtime summary of one employee for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// The employee the summary is for.
    pub employee_id: String,
    /// The pay period covered.
    pub pay_period: PayPeriod,
    /// One line per worked day, in date order.
    pub days: Vec<DailyOvertime>,
    /// Regular minutes across all days.
    pub total_regular_minutes: i64,
    /// Overtime minutes across all days.
    pub total_overtime_minutes: i64,
    /// Overtime minutes converted to hours.
    pub overtime_hours: Decimal,
    /// The employee's base hourly rate.
    pub hourly_rate: Decimal,
    /// The overtime rate multiplier applied.
    pub rate_multiplier: Decimal,
    /// The overtime payment, rounded to cents.
    pub overtime_pay: Decimal,
    /// One step per counted session followed by the pay computation.
    pub audit_steps: Vec<AuditStep>,
    /// Sessions left out of the summary.
    pub warnings: Vec<AuditWarning>,
}

/// Summarizes the overtime of `employee_id` within `pay_period`.
///
/// Only records belonging to the employee whose check-in day falls within
/// the pay period are considered. Sessions without a check-out are skipped
/// with an `OPEN_SESSION` warning, since their overtime is not final yet.
///
/// # Arguments
///
/// * `employee_id` - The employee to summarize
/// * `records` - Attendance records; may contain other employees and days
/// * `pay_period` - The inclusive date range to summarize
/// * `shift` - The employee's department shift
/// * `hourly_rate` - The base hourly rate
/// * `rate_multiplier` - The overtime multiplier (e.g. 1.5)
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// # Errors
///
/// - [`EngineError::InvalidWorkWindow`] if a closed record checks out
///   before it checks in
/// - [`EngineError::CalculationError`] if the payment overflows
///
/// # Example
///
/// ```
/// use worktime_engine::calculation::{ResolvedShift, summarize_overtime};
/// use worktime_engine::models::{AttendanceRecord, PayPeriod, ShiftConfig};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let shift = ResolvedShift::from_config(
///     &ShiftConfig::new("9:00 AM", "6:00 PM", Decimal::new(9, 0)),
/// ).unwrap();
/// let records = vec![AttendanceRecord {
///     id: "att_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     check_in: at("2026-01-15 08:00"),
///     check_out: Some(at("2026-01-15 18:30")),
/// }];
/// let pay_period = PayPeriod {
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
///
/// let summary = summarize_overtime(
///     "emp_001",
///     &records,
///     &pay_period,
///     &shift,
///     Decimal::from_str("30.00").unwrap(),
///     Decimal::from_str("1.5").unwrap(),
///     1,
/// ).unwrap();
///
/// assert_eq!(summary.total_overtime_minutes, 90);
/// assert_eq!(summary.overtime_pay, Decimal::from_str("67.50").unwrap());
/// ```
pub fn summarize_overtime(
    employee_id: &str,
    records: &[AttendanceRecord],
    pay_period: &PayPeriod,
    shift: &ResolvedShift,
    hourly_rate: Decimal,
    rate_multiplier: Decimal,
    step_number_start: u32,
) -> EngineResult<OvertimeSummary> {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number = step_number_start;
    let mut days: BTreeMap<NaiveDate, DailyOvertime> = BTreeMap::new();

    let mut in_period: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|record| record.employee_id == employee_id)
        .filter(|record| pay_period.contains_date(record.work_date()))
        .collect();
    in_period.sort_by_key(|record| record.check_in);

    for record in in_period {
        let Some(check_out) = record.check_out else {
            warnings.push(AuditWarning {
                code: "OPEN_SESSION".to_string(),
                message: format!(
                    "Attendance {} checked in at {} has no check-out and was not counted",
                    record.id, record.check_in
                ),
                severity: "medium".to_string(),
            });
            continue;
        };

        let session = calculate_session_breakdown(record, check_out, shift)?;
        let breakdown = session.breakdown;

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "work_breakdown".to_string(),
            rule_name: "Working Time Breakdown".to_string(),
            input: serde_json::json!({
                "record_id": record.id,
                "check_in": record.check_in.to_string(),
                "check_out": check_out.to_string(),
                "shift_start": shift.display_start(),
                "shift_end": shift.display_end()
            }),
            output: serde_json::json!({
                "regular_minutes": breakdown.regular_minutes,
                "early_arrival_overtime_minutes": breakdown.early_arrival_overtime_minutes,
                "late_departure_overtime_minutes": breakdown.late_departure_overtime_minutes,
                "overtime_minutes": breakdown.overtime_minutes,
                "total_minutes": breakdown.total_minutes
            }),
            reasoning: format!(
                "Worked {} inside {} - {}, {} before and {} after",
                format_minutes(breakdown.regular_minutes),
                shift.display_start(),
                shift.display_end(),
                format_minutes(breakdown.early_arrival_overtime_minutes),
                format_minutes(breakdown.late_departure_overtime_minutes)
            ),
        });
        step_number += 1;

        let day = days
            .entry(record.work_date())
            .or_insert_with(|| DailyOvertime::new(record.work_date()));
        day.sessions += 1;
        day.regular_minutes += breakdown.regular_minutes;
        day.early_arrival_overtime_minutes += breakdown.early_arrival_overtime_minutes;
        day.late_departure_overtime_minutes += breakdown.late_departure_overtime_minutes;
        day.overtime_minutes += breakdown.overtime_minutes;
    }

    let days: Vec<DailyOvertime> = days.into_values().collect();
    let total_regular_minutes: i64 = days.iter().map(|day| day.regular_minutes).sum();
    let total_overtime_minutes: i64 = days.iter().map(|day| day.overtime_minutes).sum();

    let overtime_hours = Decimal::from(total_overtime_minutes) / Decimal::from(60);
    let overflow = || EngineError::CalculationError {
        message: format!(
            "Overtime pay overflowed: {} minutes at ${} × {}",
            total_overtime_minutes, hourly_rate, rate_multiplier
        ),
    };
    let overtime_rate = hourly_rate.checked_mul(rate_multiplier).ok_or_else(overflow)?;
    // Divide last: minutes / 60 does not terminate in decimal.
    let overtime_pay = (Decimal::from(total_overtime_minutes)
        .checked_mul(overtime_rate)
        .ok_or_else(overflow)?
        / Decimal::from(60))
    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_minutes": total_overtime_minutes,
            "hourly_rate": hourly_rate.normalize().to_string(),
            "rate_multiplier": rate_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "rate": overtime_rate.normalize().to_string(),
            "amount": overtime_pay.to_string()
        }),
        reasoning: format!(
            "{} hours of overtime at {}× ${}: {} hours × ${} = ${}",
            overtime_hours.round_dp(4).normalize(),
            rate_multiplier.normalize(),
            hourly_rate.normalize(),
            overtime_hours.round_dp(4).normalize(),
            overtime_rate.normalize(),
            overtime_pay
        ),
    });

    Ok(OvertimeSummary {
        employee_id: employee_id.to_string(),
        pay_period: pay_period.clone(),
        days,
        total_regular_minutes,
        total_overtime_minutes,
        overtime_hours,
        hourly_rate,
        rate_multiplier,
        overtime_pay,
        audit_steps,
        warnings,
    })
}
