use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::models::request::RequestStatus;
use crate::types::{LeaveRequestId, UserId};
use crate::validation::rules;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub user_id: UserId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: RequestStatus,
    pub approved_by: Option<UserId>,
    pub approved_at: Option<DateTime<Utc>>,
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    Official,
    HalfDay,
    Special,
    Maternity,
    Paternity,
}

impl LeaveType {
    pub const ALL: [LeaveType; 8] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Personal,
        LeaveType::Official,
        LeaveType::HalfDay,
        LeaveType::Special,
        LeaveType::Maternity,
        LeaveType::Paternity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Official => "official",
            LeaveType::HalfDay => "half_day",
            LeaveType::Special => "special",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        LeaveType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| AppError::validation("leave_type", format!("unknown leave type: {s}")))
    }
}

/// Submission payload as entered by the employee. Dates stay optional so an
/// incomplete form is reported as a validation failure, not a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewLeaveRequest {
    pub leave_type: LeaveType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(
        custom(function = "rules::validate_not_blank"),
        length(max = 500, code = "too_long")
    )]
    pub reason: String,
}

impl NewLeaveRequest {
    pub fn new(
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            leave_type,
            start_date: Some(start_date),
            end_date: Some(end_date),
            reason: reason.into(),
        }
    }

    /// Checks the payload and returns the confirmed `(start, end)` range.
    pub fn validated_range(&self) -> Result<(NaiveDate, NaiveDate), AppError> {
        self.validate()?;
        let start = self
            .start_date
            .ok_or_else(|| AppError::validation("start_date", "required"))?;
        let end = self
            .end_date
            .ok_or_else(|| AppError::validation("end_date", "required"))?;
        if end < start {
            return Err(AppError::validation(
                "end_date",
                "end_date_before_start_date",
            ));
        }
        Ok((start, end))
    }
}

impl LeaveRequest {
    pub fn new(
        user_id: UserId,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: String,
    ) -> Self {
        Self {
            id: LeaveRequestId::new(),
            user_id,
            leave_type,
            start_date,
            end_date,
            reason,
            status: RequestStatus::Pending,
            approved_by: None,
            approved_at: None,
            applied_at: Utc::now(),
        }
    }

    /// Moves a pending request to `status`. The record is left untouched on error.
    pub fn decide(
        &mut self,
        status: RequestStatus,
        approver: UserId,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if self.status.is_terminal() {
            return Err(AppError::invalid_transition(self.id, self.status));
        }
        if !status.is_terminal() {
            return Err(AppError::validation("status", "decision_must_be_terminal"));
        }
        self.status = status;
        self.approved_by = Some(approver);
        self.approved_at = Some(at);
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }

    /// Number of calendar days covered, both ends included.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && from <= self.end_date
    }
}
