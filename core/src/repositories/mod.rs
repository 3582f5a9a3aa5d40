pub mod employee;
pub mod leave_request;

pub use employee::{EmployeeRepository, EmployeeRepositoryTrait};
pub use leave_request::{LeaveRequestRepository, LeaveRequestRepositoryTrait};
