//! HTTP API module for the Working-Time Engine.
//!
//! This module provides the REST API endpoints for previewing and finalizing
//! attendance breakdowns and for summarizing overtime pay.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BreakdownRequest, PayrollRequest, ShiftSource};
pub use response::{ApiError, ApiErrorResponse, BreakdownResponse, PayrollResponse, ShiftSummary};
pub use state::AppState;
