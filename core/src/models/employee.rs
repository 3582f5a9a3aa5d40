//! Models that represent employees, their roles, and organisation lookups.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::types::{DepartmentId, PositionId, UserId};
use crate::validation::rules;

/// Label shown when an employee has no department or position.
pub const UNASSIGNED_LABEL: &str = "미지정";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Directory record for an employee. Also used as the acting identity for
/// authorization checks.
pub struct Employee {
    /// Unique identifier for the employee account.
    pub user_id: UserId,
    /// Company-issued employee number.
    pub employee_code: String,
    /// Login name.
    pub username: String,
    /// Human-readable full name.
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub position_id: Option<PositionId>,
    /// Role describing the employee's privileges.
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
/// Supported roles.
pub enum Role {
    /// Standard employee role with limited permissions.
    #[default]
    Employee,
    /// Team lead allowed to decide leave requests.
    Manager,
    /// Administrator role with elevated permissions.
    Admin,
}

impl Role {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(AppError::validation("role", format!("unknown role: {other}"))),
        }
    }
}

impl Serialize for Role {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        // tolerate legacy casings such as "ADMIN" or "Manager"
        s.parse().map_err(|_| {
            serde::de::Error::unknown_variant(&s, &["employee", "manager", "admin"])
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: PositionId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
/// Partial update for an employee record. `None` leaves the field unchanged
/// and is not validated.
pub struct EmployeePatch {
    #[validate(custom(function = "rules::validate_not_blank"))]
    pub name: Option<String>,
    #[validate(email(code = "email_invalid_format"))]
    pub email: Option<String>,
    #[validate(custom(function = "rules::validate_phone"))]
    pub phone: Option<String>,
    pub department_id: Option<DepartmentId>,
    pub position_id: Option<PositionId>,
    pub role: Option<Role>,
}

impl EmployeePatch {
    pub fn apply(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = Some(email);
        }
        if let Some(phone) = self.phone {
            employee.phone = Some(phone);
        }
        if let Some(department_id) = self.department_id {
            employee.department_id = Some(department_id);
        }
        if let Some(position_id) = self.position_id {
            employee.position_id = Some(position_id);
        }
        if let Some(role) = self.role {
            employee.role = role;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
/// Field targeted by a directory search.
pub enum SearchField {
    #[default]
    All,
    Name,
    Code,
    Department,
    Position,
    Email,
    Phone,
}

impl FromStr for SearchField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(SearchField::All),
            "name" => Ok(SearchField::Name),
            "code" => Ok(SearchField::Code),
            "department" => Ok(SearchField::Department),
            "position" => Ok(SearchField::Position),
            "email" => Ok(SearchField::Email),
            "phone" => Ok(SearchField::Phone),
            other => Err(AppError::validation(
                "field",
                format!("unknown search field: {other}"),
            )),
        }
    }
}
