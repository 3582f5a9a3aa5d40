//! Workflow status shared by every leave request.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
/// Decision state of a leave request. `Approved` and `Rejected` are terminal.
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_open() {
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
    }

    #[test]
    fn status_serde_snake_case() {
        let rs: RequestStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(rs, RequestStatus::Rejected);
        let v = serde_json::to_value(RequestStatus::Approved).unwrap();
        assert_eq!(v, serde_json::json!("approved"));
    }
}
