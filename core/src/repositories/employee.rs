//! Employee directory store plus department and position lookups.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::employee::{Department, Employee, EmployeePatch, Position};
use crate::types::{DepartmentId, PositionId, UserId};

const ENTITY: &str = "employee";

/// Repository trait for Employee operations.
///
/// Use `MockEmployeeRepositoryTrait` in unit tests to inject failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepositoryTrait: Send + Sync {
    /// All employees in insertion order.
    async fn find_all(&self) -> Result<Vec<Employee>, AppError>;

    async fn find_by_id(&self, id: UserId) -> Result<Employee, AppError>;

    /// Add a record; fails if the id is already taken.
    async fn create(&self, employee: Employee) -> Result<Employee, AppError>;

    /// Apply an already validated patch.
    async fn update(&self, id: UserId, patch: EmployeePatch) -> Result<Employee, AppError>;

    async fn delete(&self, id: UserId) -> Result<(), AppError>;

    /// Departments ordered by id.
    async fn departments(&self) -> Result<Vec<Department>, AppError>;

    /// Positions ordered by id.
    async fn positions(&self) -> Result<Vec<Position>, AppError>;

    async fn upsert_department(&self, department: Department) -> Result<(), AppError>;

    async fn upsert_position(&self, position: Position) -> Result<(), AppError>;
}

/// In-memory implementation of EmployeeRepositoryTrait.
#[derive(Debug, Default)]
pub struct EmployeeRepository {
    employees: RwLock<Vec<Employee>>,
    departments: RwLock<BTreeMap<DepartmentId, String>>,
    positions: RwLock<BTreeMap<PositionId, String>>,
}

impl EmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position_of(employees: &[Employee], id: UserId) -> Result<usize, AppError> {
    employees
        .iter()
        .position(|e| e.user_id == id)
        .ok_or_else(|| AppError::not_found(ENTITY, id))
}

#[async_trait]
impl EmployeeRepositoryTrait for EmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.read().await.clone())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Employee, AppError> {
        let employees = self.employees.read().await;
        let index = position_of(&employees, id)?;
        Ok(employees[index].clone())
    }

    async fn create(&self, employee: Employee) -> Result<Employee, AppError> {
        let mut employees = self.employees.write().await;
        if employees.iter().any(|e| e.user_id == employee.user_id) {
            return Err(AppError::validation("user_id", "already_exists"));
        }
        employees.push(employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: UserId, patch: EmployeePatch) -> Result<Employee, AppError> {
        let mut employees = self.employees.write().await;
        let index = position_of(&employees, id)?;
        let employee = &mut employees[index];
        patch.apply(employee);
        Ok(employee.clone())
    }

    async fn delete(&self, id: UserId) -> Result<(), AppError> {
        let mut employees = self.employees.write().await;
        let index = position_of(&employees, id)?;
        employees.remove(index);
        Ok(())
    }

    async fn departments(&self) -> Result<Vec<Department>, AppError> {
        Ok(self
            .departments
            .read()
            .await
            .iter()
            .map(|(id, name)| Department {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn positions(&self) -> Result<Vec<Position>, AppError> {
        Ok(self
            .positions
            .read()
            .await
            .iter()
            .map(|(id, name)| Position {
                id: *id,
                name: name.clone(),
            })
            .collect())
    }

    async fn upsert_department(&self, department: Department) -> Result<(), AppError> {
        self.departments
            .write()
            .await
            .insert(department.id, department.name);
        Ok(())
    }

    async fn upsert_position(&self, position: Position) -> Result<(), AppError> {
        self.positions
            .write()
            .await
            .insert(position.id, position.name);
        Ok(())
    }
}
