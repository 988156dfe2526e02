//! Working-Time Engine for attendance and overtime
//!
//! This crate splits an employee's attendance interval into regular time
//! (inside the department shift window) and overtime (early arrival before
//! the window, late departure after it), for live previews while checked in
//! and for finalized records, and rolls finalized records up into overtime pay.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
