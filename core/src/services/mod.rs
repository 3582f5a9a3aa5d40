pub mod approval_policy;
pub mod employee_directory;
pub mod leave_workflow;

pub use approval_policy::{ApprovalPolicy, Capabilities};
pub use employee_directory::EmployeeDirectory;
pub use leave_workflow::{
    DateRange, DeleteFailure, DeleteResult, LeaveFilter, LeaveStatistics, LeaveWorkflow,
};
