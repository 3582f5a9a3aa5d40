//! Leave-request workflow and HR directory core for the company portal.
//!
//! The presentation layer builds an [`AppState`] and calls
//! [`LeaveWorkflow`](services::LeaveWorkflow) and
//! [`EmployeeDirectory`](services::EmployeeDirectory); everything it renders
//! comes back as plain values or an [`AppError`].

pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{AppError, ErrorResponse, Result};
pub use state::AppState;
