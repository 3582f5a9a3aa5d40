//! Who may decide, delete, and manage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::employee::{Employee, Role};
use crate::types::PositionId;

/// Rule deciding which actors count as approvers.
///
/// An actor is an approver when its role is listed in `approver_roles` or its
/// position is listed in `approver_positions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    pub approver_roles: BTreeSet<Role>,
    pub approver_positions: BTreeSet<PositionId>,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            approver_roles: BTreeSet::from([Role::Manager, Role::Admin]),
            approver_positions: BTreeSet::new(),
        }
    }
}

/// Actions the presentation layer may offer to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub approve_leave: bool,
    pub delete_leave: bool,
    pub manage_employees: bool,
}

impl ApprovalPolicy {
    pub fn new(
        approver_roles: impl IntoIterator<Item = Role>,
        approver_positions: impl IntoIterator<Item = PositionId>,
    ) -> Self {
        Self {
            approver_roles: approver_roles.into_iter().collect(),
            approver_positions: approver_positions.into_iter().collect(),
        }
    }

    pub fn is_approver(&self, actor: &Employee) -> bool {
        self.approver_roles.contains(&actor.role)
            || actor
                .position_id
                .is_some_and(|position| self.approver_positions.contains(&position))
    }

    pub fn capabilities(&self, actor: &Employee) -> Capabilities {
        let approver = self.is_approver(actor);
        Capabilities {
            approve_leave: approver,
            delete_leave: approver,
            manage_employees: approver || actor.role == Role::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn actor(role: Role, position: Option<i64>) -> Employee {
        Employee {
            user_id: UserId::new(1),
            employee_code: "E001".into(),
            username: "actor".into(),
            name: "Actor".into(),
            email: None,
            phone: None,
            department_id: None,
            position_id: position.map(PositionId::new),
            role,
        }
    }

    #[test]
    fn default_policy_grants_managers_and_admins() {
        let policy = ApprovalPolicy::default();
        assert!(policy.is_approver(&actor(Role::Manager, None)));
        assert!(policy.is_approver(&actor(Role::Admin, None)));
        assert!(!policy.is_approver(&actor(Role::Employee, Some(1))));
    }

    #[test]
    fn position_rule_grants_without_role() {
        let policy = ApprovalPolicy::new([], [PositionId::new(1)]);
        assert!(policy.is_approver(&actor(Role::Employee, Some(1))));
        assert!(!policy.is_approver(&actor(Role::Employee, Some(2))));
        assert!(!policy.is_approver(&actor(Role::Admin, None)));
    }

    #[test]
    fn admins_manage_employees_even_when_not_approvers() {
        let policy = ApprovalPolicy::new([Role::Manager], []);
        let caps = policy.capabilities(&actor(Role::Admin, None));
        assert!(!caps.approve_leave);
        assert!(!caps.delete_leave);
        assert!(caps.manage_employees);

        let caps = policy.capabilities(&actor(Role::Employee, None));
        assert_eq!(caps, Capabilities::default());
    }
}
