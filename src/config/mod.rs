//! Configuration loading and management for the Working-Time Engine.
//!
//! This module provides functionality to load working-time configuration
//! from YAML files: organization settings and each department's shift window.
//!
//! # Example
//!
//! ```no_run
//! use worktime_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded configuration for: {}", config.settings().organization);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    Department, DepartmentEntry, DepartmentsConfig, InvalidShiftPolicy, Settings, WorktimeConfig,
};
