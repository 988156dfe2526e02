//! Configuration types for working-time calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the resolved
//! [`WorktimeConfig`] built from them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info_span;

use crate::calculation::ResolvedShift;
use crate::error::EngineResult;
use crate::models::ShiftConfig;

/// What to do with a department whose shift boundary cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidShiftPolicy {
    /// Fail with a configuration error.
    #[default]
    Reject,
    /// Substitute 9:00 AM / 6:00 PM for the malformed boundary and log it.
    UseDefaults,
}

fn default_rate_multiplier() -> Decimal {
    Decimal::ONE
}

/// Organization-wide settings (`settings.yaml`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// The organization name, for display.
    pub organization: String,
    /// Multiplier applied to the hourly rate for overtime pay.
    #[serde(default = "default_rate_multiplier")]
    pub overtime_rate_multiplier: Decimal,
    /// Handling of malformed department shift boundaries.
    #[serde(default)]
    pub invalid_shift_policy: InvalidShiftPolicy,
}

/// A department as written in `departments.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepartmentEntry {
    /// The human-readable department name.
    pub name: String,
    /// The department's shift window.
    pub shift: ShiftConfig,
}

/// Departments configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentsConfig {
    /// Map of department id to department details.
    pub departments: HashMap<String, DepartmentEntry>,
}

/// A department with its shift window parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Department {
    /// The department id (the key in `departments.yaml`).
    pub id: String,
    /// The human-readable department name.
    pub name: String,
    /// The shift window as configured.
    pub shift: ShiftConfig,
    /// The shift window with parsed boundaries.
    pub resolved: ResolvedShift,
}

/// Complete working-time configuration.
///
/// This struct aggregates all configuration loaded from the YAML files in a
/// configuration directory. Every department's shift is parsed once here.
#[derive(Debug, Clone)]
pub struct WorktimeConfig {
    /// Organization-wide settings.
    settings: Settings,
    /// Departments by id.
    departments: HashMap<String, Department>,
}

impl WorktimeConfig {
    /// Creates a new WorktimeConfig, resolving every department's shift
    /// under the configured [`InvalidShiftPolicy`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error for the first department whose shift
    /// cannot be resolved.
    pub fn new(
        settings: Settings,
        departments: HashMap<String, DepartmentEntry>,
    ) -> EngineResult<Self> {
        let resolved = departments
            .into_iter()
            .map(|(id, entry)| {
                let _span = info_span!("department", id = %id).entered();
                let resolved = ResolvedShift::resolve(&entry.shift, settings.invalid_shift_policy)?;
                let department = Department {
                    id: id.clone(),
                    name: entry.name,
                    shift: entry.shift,
                    resolved,
                };
                Ok((id, department))
            })
            .collect::<EngineResult<HashMap<_, _>>>()?;

        Ok(Self {
            settings,
            departments: resolved,
        })
    }

    /// Returns the organization-wide settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns all departments.
    pub fn departments(&self) -> &HashMap<String, Department> {
        &self.departments
    }
}
