//! Leave request workflow: authorization, decisions, and reporting.
//!
//! Presentation code calls this service instead of the store so every
//! state change goes through the approval policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::employee::Employee;
use crate::models::leave_request::{LeaveRequest, LeaveType, NewLeaveRequest};
use crate::models::request::RequestStatus;
use crate::pagination::{Page, PageView};
use crate::repositories::LeaveRequestRepositoryTrait;
use crate::services::approval_policy::{ApprovalPolicy, Capabilities};
use crate::types::{LeaveRequestId, UserId};

/// Free-text note attached to a rejection.
#[derive(Debug, Validate)]
struct DecisionNote {
    #[validate(length(max = 500, code = "too_long"))]
    note: String,
}

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Independent criteria combined with AND. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveFilter {
    pub status: Option<RequestStatus>,
    pub leave_type: Option<LeaveType>,
    pub date_range: Option<DateRange>,
    pub user_id: Option<UserId>,
}

impl LeaveFilter {
    pub fn matches(&self, request: &LeaveRequest) -> bool {
        self.status.map_or(true, |s| request.status == s)
            && self.leave_type.map_or(true, |t| request.leave_type == t)
            && self
                .date_range
                .map_or(true, |range| request.overlaps(range.from, range.to))
            && self.user_id.map_or(true, |u| request.user_id == u)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeaveStatistics {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl LeaveStatistics {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a LeaveRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut stats, request| {
                stats.total += 1;
                match request.status {
                    RequestStatus::Pending => stats.pending += 1,
                    RequestStatus::Approved => stats.approved += 1,
                    RequestStatus::Rejected => stats.rejected += 1,
                }
                stats
            })
    }
}

#[derive(Debug)]
pub struct DeleteFailure {
    pub id: LeaveRequestId,
    pub error: AppError,
}

/// Per-id outcome of a batch delete.
#[derive(Debug, Default)]
pub struct DeleteResult {
    pub succeeded: Vec<LeaveRequestId>,
    pub failed: Vec<DeleteFailure>,
}

impl DeleteResult {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct LeaveWorkflow {
    store: Arc<dyn LeaveRequestRepositoryTrait>,
    policy: ApprovalPolicy,
    page_size: usize,
}

impl LeaveWorkflow {
    pub fn new(
        store: Arc<dyn LeaveRequestRepositoryTrait>,
        policy: ApprovalPolicy,
        page_size: usize,
    ) -> Self {
        Self {
            store,
            policy,
            page_size,
        }
    }

    pub fn policy(&self) -> &ApprovalPolicy {
        &self.policy
    }

    pub fn capabilities(&self, actor: &Employee) -> Capabilities {
        self.policy.capabilities(actor)
    }

    fn require_approver(&self, actor: &Employee, action: &str) -> Result<(), AppError> {
        if self.policy.is_approver(actor) {
            return Ok(());
        }
        tracing::warn!(actor = %actor.user_id, action, "leave action refused: not an approver");
        Err(AppError::unauthorized(format!(
            "Only approvers can {action} leave requests"
        )))
    }

    pub async fn submit(
        &self,
        actor: &Employee,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, AppError> {
        let created = self.store.submit(actor.user_id, request).await?;
        tracing::info!(
            leave_id = %created.id,
            actor = %actor.user_id,
            leave_type = %created.leave_type,
            "leave request submitted"
        );
        Ok(created)
    }

    pub async fn approve(
        &self,
        actor: &Employee,
        id: LeaveRequestId,
    ) -> Result<LeaveRequest, AppError> {
        self.require_approver(actor, "approve")?;
        let approved = self
            .store
            .update_status(id, RequestStatus::Approved, actor.user_id)
            .await?;
        tracing::info!(leave_id = %id, actor = %actor.user_id, "leave request approved");
        Ok(approved)
    }

    /// Rejects a pending request. `note` is recorded in the log only.
    pub async fn reject(
        &self,
        actor: &Employee,
        id: LeaveRequestId,
        note: &str,
    ) -> Result<LeaveRequest, AppError> {
        self.require_approver(actor, "reject")?;
        DecisionNote {
            note: note.to_owned(),
        }
        .validate()?;
        let rejected = self
            .store
            .update_status(id, RequestStatus::Rejected, actor.user_id)
            .await?;
        tracing::info!(leave_id = %id, actor = %actor.user_id, note, "leave request rejected");
        Ok(rejected)
    }

    pub async fn cancel(&self, actor: &Employee, id: LeaveRequestId) -> Result<(), AppError> {
        self.store.cancel(id, actor.user_id).await.inspect_err(|err| {
            if matches!(err, AppError::Unauthorized(_)) {
                tracing::warn!(leave_id = %id, actor = %actor.user_id, "cancel refused: not the owner");
            }
        })?;
        tracing::info!(leave_id = %id, actor = %actor.user_id, "leave request cancelled");
        Ok(())
    }

    /// Deletes each id independently; one failure does not stop the batch.
    pub async fn bulk_delete(
        &self,
        actor: &Employee,
        ids: &[LeaveRequestId],
    ) -> Result<DeleteResult, AppError> {
        self.require_approver(actor, "delete")?;
        let mut result = DeleteResult::default();
        for &id in ids {
            match self.store.remove(id).await {
                Ok(()) => result.succeeded.push(id),
                Err(error) => result.failed.push(DeleteFailure { id, error }),
            }
        }
        tracing::info!(
            actor = %actor.user_id,
            succeeded = result.succeeded.len(),
            failed = result.failed.len(),
            "leave requests deleted"
        );
        Ok(result)
    }

    pub async fn find(&self, id: LeaveRequestId) -> Result<LeaveRequest, AppError> {
        self.store.find_by_id(id).await
    }

    pub async fn list_all(&self) -> Result<Vec<LeaveRequest>, AppError> {
        self.store.find_all().await
    }

    pub async fn my_requests(&self, actor: &Employee) -> Result<Vec<LeaveRequest>, AppError> {
        self.store.find_by_user(actor.user_id).await
    }

    /// Requests matching `criteria`, in store order.
    pub async fn filter(&self, criteria: &LeaveFilter) -> Result<Vec<LeaveRequest>, AppError> {
        let all = self.store.find_all().await?;
        let matched: Vec<_> = all.into_iter().filter(|r| criteria.matches(r)).collect();
        tracing::debug!(matched = matched.len(), "leave requests filtered");
        Ok(matched)
    }

    pub fn statistics(requests: &[LeaveRequest]) -> LeaveStatistics {
        LeaveStatistics::from_requests(requests)
    }

    pub fn page(&self, requests: &[LeaveRequest], page_index: usize) -> Page<LeaveRequest> {
        PageView::paginate(requests, self.page_size, page_index).to_page()
    }
}
