//! Data models shared across repositories and services.

pub mod employee;
pub mod leave_request;
pub mod request;
