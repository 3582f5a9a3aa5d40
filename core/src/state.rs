use std::sync::Arc;

use crate::config::Config;
use crate::repositories::{
    EmployeeRepository, EmployeeRepositoryTrait, LeaveRequestRepository,
    LeaveRequestRepositoryTrait,
};
use crate::services::{EmployeeDirectory, LeaveWorkflow};

/// Shared services handed to the presentation layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub leave_workflow: Arc<LeaveWorkflow>,
    pub employee_directory: Arc<EmployeeDirectory>,
}

impl AppState {
    pub fn new(
        config: Config,
        leave_repo: Arc<dyn LeaveRequestRepositoryTrait>,
        employee_repo: Arc<dyn EmployeeRepositoryTrait>,
    ) -> Self {
        let leave_workflow = Arc::new(LeaveWorkflow::new(
            leave_repo,
            config.approval_policy(),
            config.page_size,
        ));
        let employee_directory = Arc::new(EmployeeDirectory::new(employee_repo));
        Self {
            config,
            leave_workflow,
            employee_directory,
        }
    }

    /// Loads configuration from the environment, installs tracing with the
    /// configured filter, and wires in-memory stores.
    pub fn bootstrap() -> anyhow::Result<Self> {
        let config = Config::load()?;
        if !config.init_tracing() {
            tracing::debug!("tracing subscriber already installed");
        }
        tracing::info!(page_size = config.page_size, "portal core starting");
        Ok(Self::in_memory(config))
    }

    /// Wires both services to fresh in-memory stores.
    pub fn in_memory(config: Config) -> Self {
        Self::new(
            config,
            Arc::new(LeaveRequestRepository::new()),
            Arc::new(EmployeeRepository::new()),
        )
    }
}
