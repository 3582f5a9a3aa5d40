//! Validation rules shared by leave submissions and employee edits.

pub mod rules;

pub use validator::ValidationError;
