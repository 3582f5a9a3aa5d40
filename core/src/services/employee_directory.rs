//! HR employee directory: listing, search and edits.

use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::employee::{
    Department, Employee, EmployeePatch, Position, SearchField, UNASSIGNED_LABEL,
};
use crate::pagination::{Page, PageView};
use crate::repositories::EmployeeRepositoryTrait;
use crate::types::{DepartmentId, PositionId, UserId};

pub struct EmployeeDirectory {
    repo: Arc<dyn EmployeeRepositoryTrait>,
}

/// Department and position names resolved once per query.
struct Lookups {
    departments: HashMap<DepartmentId, String>,
    positions: HashMap<PositionId, String>,
}

impl Lookups {
    fn department(&self, employee: &Employee) -> &str {
        employee
            .department_id
            .and_then(|id| self.departments.get(&id))
            .map_or(UNASSIGNED_LABEL, String::as_str)
    }

    fn position(&self, employee: &Employee) -> &str {
        employee
            .position_id
            .and_then(|id| self.positions.get(&id))
            .map_or(UNASSIGNED_LABEL, String::as_str)
    }

    fn field_values<'a>(&'a self, employee: &'a Employee, field: SearchField) -> Vec<&'a str> {
        match field {
            SearchField::All => [
                SearchField::Name,
                SearchField::Code,
                SearchField::Department,
                SearchField::Position,
                SearchField::Email,
                SearchField::Phone,
            ]
            .into_iter()
            .flat_map(|f| self.field_values(employee, f))
            .collect(),
            SearchField::Name => vec![employee.name.as_str()],
            SearchField::Code => vec![employee.employee_code.as_str()],
            SearchField::Department => vec![self.department(employee)],
            SearchField::Position => vec![self.position(employee)],
            SearchField::Email => employee.email.as_deref().into_iter().collect(),
            SearchField::Phone => employee.phone.as_deref().into_iter().collect(),
        }
    }
}

impl EmployeeDirectory {
    pub fn new(repo: Arc<dyn EmployeeRepositoryTrait>) -> Self {
        Self { repo }
    }

    async fn lookups(&self) -> Result<Lookups, AppError> {
        let departments = self
            .repo
            .departments()
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect();
        let positions = self
            .repo
            .positions()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        Ok(Lookups {
            departments,
            positions,
        })
    }

    pub async fn list(&self, page: usize, page_size: usize) -> Result<Page<Employee>, AppError> {
        let employees = self.repo.find_all().await?;
        Ok(PageView::paginate(&employees, page_size, page).to_page())
    }

    /// Case-insensitive substring search. Only empty `text` matches everyone;
    /// whitespace is matched literally.
    pub async fn search(&self, field: SearchField, text: &str) -> Result<Vec<Employee>, AppError> {
        let employees = self.repo.find_all().await?;
        let needle = text.to_lowercase();
        if needle.is_empty() {
            return Ok(employees);
        }

        let lookups = self.lookups().await?;
        let matched: Vec<_> = employees
            .into_iter()
            .filter(|e| {
                lookups
                    .field_values(e, field)
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
            })
            .collect();
        tracing::debug!(?field, matched = matched.len(), "employee search");
        Ok(matched)
    }

    pub async fn find(&self, id: UserId) -> Result<Employee, AppError> {
        self.repo.find_by_id(id).await
    }

    pub async fn update(&self, id: UserId, patch: EmployeePatch) -> Result<Employee, AppError> {
        patch.validate()?;
        let updated = self.repo.update(id, patch).await?;
        tracing::info!(employee = %id, "employee updated");
        Ok(updated)
    }

    /// Removes an employee. Deleting the same id twice fails with `NotFound`.
    pub async fn delete(&self, id: UserId) -> Result<(), AppError> {
        self.repo.delete(id).await?;
        tracing::info!(employee = %id, "employee deleted");
        Ok(())
    }

    pub async fn departments(&self) -> Result<Vec<Department>, AppError> {
        self.repo.departments().await
    }

    pub async fn positions(&self) -> Result<Vec<Position>, AppError> {
        self.repo.positions().await
    }

    /// Department name, or `미지정` when unassigned or unknown.
    pub async fn department_name(&self, employee: &Employee) -> Result<String, AppError> {
        Ok(self.lookups().await?.department(employee).to_string())
    }

    /// Position name, or `미지정` when unassigned or unknown.
    pub async fn position_name(&self, employee: &Employee) -> Result<String, AppError> {
        Ok(self.lookups().await?.position(employee).to_string())
    }
}
