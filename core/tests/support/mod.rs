#![allow(dead_code)]
use chrono::NaiveDate;
use portal_core::{
    config::Config,
    models::employee::{Department, Employee, Position, Role},
    models::leave_request::{LeaveType, NewLeaveRequest},
    repositories::EmployeeRepositoryTrait,
    state::AppState,
    types::{DepartmentId, PositionId, UserId},
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn employee(id: i64, role: Role) -> Employee {
    Employee {
        user_id: UserId::new(id),
        employee_code: format!("E{id:03}"),
        username: format!("user{id}"),
        name: format!("User {id}"),
        email: None,
        phone: None,
        department_id: None,
        position_id: None,
        role,
    }
}

pub fn vacation() -> NewLeaveRequest {
    NewLeaveRequest::new(
        LeaveType::Annual,
        date(2025, 8, 1),
        date(2025, 8, 3),
        "vacation",
    )
}

pub fn test_state() -> AppState {
    AppState::in_memory(Config::default())
}

/// Seeds a small organisation: HR and Engineering, Team Lead and Engineer.
pub async fn seed_directory(repo: &dyn EmployeeRepositoryTrait) -> Vec<Employee> {
    repo.upsert_department(Department {
        id: DepartmentId::new(1),
        name: "HR".into(),
    })
    .await
    .expect("seed department");
    repo.upsert_department(Department {
        id: DepartmentId::new(2),
        name: "Engineering".into(),
    })
    .await
    .expect("seed department");
    repo.upsert_position(Position {
        id: PositionId::new(1),
        name: "Team Lead".into(),
    })
    .await
    .expect("seed position");
    repo.upsert_position(Position {
        id: PositionId::new(2),
        name: "Engineer".into(),
    })
    .await
    .expect("seed position");

    let people = vec![
        Employee {
            user_id: UserId::new(1),
            employee_code: "HR-001".into(),
            username: "kim".into(),
            name: "Kim Minji".into(),
            email: Some("minji.kim@example.com".into()),
            phone: Some("010-1111-2222".into()),
            department_id: Some(DepartmentId::new(1)),
            position_id: Some(PositionId::new(1)),
            role: Role::Manager,
        },
        Employee {
            user_id: UserId::new(2),
            employee_code: "EN-002".into(),
            username: "lee".into(),
            name: "Lee Junho".into(),
            email: Some("junho.lee@example.com".into()),
            phone: Some("010-3333-4444".into()),
            department_id: Some(DepartmentId::new(2)),
            position_id: Some(PositionId::new(2)),
            role: Role::Employee,
        },
        Employee {
            user_id: UserId::new(3),
            employee_code: "EN-003".into(),
            username: "park".into(),
            name: "Park Seoyeon".into(),
            email: None,
            phone: None,
            department_id: None,
            position_id: None,
            role: Role::Employee,
        },
    ];
    for person in &people {
        repo.create(person.clone()).await.expect("seed employee");
    }
    people
}
