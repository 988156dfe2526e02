//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading working-time
//! configuration from YAML files.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::calculation::ResolvedShift;
use crate::error::{EngineError, EngineResult};

use super::types::{
    Department, DepartmentEntry, DepartmentsConfig, Settings, WorktimeConfig,
};

/// Loads and provides access to working-time configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to look up departments and their shift windows.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── settings.yaml     # Organization, overtime multiplier, shift policy
/// └── departments.yaml  # Departments and their shift windows
/// ```
///
/// # Example
///
/// ```no_run
/// use worktime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let shift = loader.resolved_shift("engineering").unwrap();
/// println!("Engineering works {} - {}", shift.display_start(), shift.display_end());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: WorktimeConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any department's shift window cannot be resolved
    ///
    /// # Example
    ///
    /// ```no_run
    /// use worktime_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), worktime_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load settings.yaml
        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<Settings>(&settings_path)?;

        // Load departments.yaml
        let departments_path = path.join("departments.yaml");
        let departments_config = Self::load_yaml::<DepartmentsConfig>(&departments_path)?;

        let loader = Self::from_parts(settings, departments_config.departments)?;

        info!(
            path = %path.display(),
            organization = %loader.settings().organization,
            departments = loader.config.departments().len(),
            "Loaded working-time configuration"
        );

        Ok(loader)
    }

    /// Builds a loader from already deserialized parts.
    pub fn from_parts(
        settings: Settings,
        departments: HashMap<String, DepartmentEntry>,
    ) -> EngineResult<Self> {
        Ok(Self {
            config: WorktimeConfig::new(settings, departments)?,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &WorktimeConfig {
        &self.config
    }

    /// Returns the organization-wide settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the configured overtime rate multiplier.
    pub fn overtime_rate_multiplier(&self) -> Decimal {
        self.config.settings().overtime_rate_multiplier
    }

    /// Looks up a department by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DepartmentNotFound`] if no department has that id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use worktime_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let department = loader.department("engineering")?;
    /// println!("Department: {}", department.name);
    /// # Ok::<(), worktime_engine::error::EngineError>(())
    /// ```
    pub fn department(&self, id: &str) -> EngineResult<&Department> {
        self.config
            .departments()
            .get(id)
            .ok_or_else(|| EngineError::DepartmentNotFound {
                department: id.to_string(),
            })
    }

    /// Returns the parsed shift window of a department.
    pub fn resolved_shift(&self, id: &str) -> EngineResult<&ResolvedShift> {
        self.department(id).map(|department| &department.resolved)
    }
}
