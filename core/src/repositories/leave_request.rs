//! Leave request store.
//!
//! `LeaveRequestRepositoryTrait` is the contract the workflow depends on; a
//! remote collaborator can implement it and surface its failures as
//! `AppError::Transport`. `LeaveRequestRepository` keeps the records in
//! memory behind a single lock.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::leave_request::{LeaveRequest, NewLeaveRequest};
use crate::models::request::RequestStatus;
use crate::types::{LeaveRequestId, UserId};

const ENTITY: &str = "leave request";

/// Repository trait for LeaveRequest operations.
///
/// Use `MockLeaveRequestRepositoryTrait` in unit tests to inject failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveRequestRepositoryTrait: Send + Sync {
    /// Validate and store a new pending request.
    async fn submit(
        &self,
        user_id: UserId,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, AppError>;

    /// All requests in insertion order.
    async fn find_all(&self) -> Result<Vec<LeaveRequest>, AppError>;

    /// Requests owned by `user_id`, in insertion order.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<LeaveRequest>, AppError>;

    async fn find_by_id(&self, id: LeaveRequestId) -> Result<LeaveRequest, AppError>;

    /// Decide a pending request. Status, approver and timestamp change together.
    async fn update_status(
        &self,
        id: LeaveRequestId,
        status: RequestStatus,
        approver_id: UserId,
    ) -> Result<LeaveRequest, AppError>;

    /// Remove a request owned by `user_id` while it is still pending.
    async fn cancel(&self, id: LeaveRequestId, user_id: UserId) -> Result<(), AppError>;

    /// Remove a request regardless of status.
    async fn remove(&self, id: LeaveRequestId) -> Result<(), AppError>;
}

/// In-memory implementation of LeaveRequestRepositoryTrait.
#[derive(Debug, Default)]
pub struct LeaveRequestRepository {
    requests: RwLock<Vec<LeaveRequest>>,
}

impl LeaveRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn position_of(requests: &[LeaveRequest], id: LeaveRequestId) -> Result<usize, AppError> {
    requests
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| AppError::not_found(ENTITY, id))
}

#[async_trait]
impl LeaveRequestRepositoryTrait for LeaveRequestRepository {
    async fn submit(
        &self,
        user_id: UserId,
        request: NewLeaveRequest,
    ) -> Result<LeaveRequest, AppError> {
        let (start_date, end_date) = request.validated_range()?;
        let created = LeaveRequest::new(
            user_id,
            request.leave_type,
            start_date,
            end_date,
            request.reason,
        );
        self.requests.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<LeaveRequest>, AppError> {
        Ok(self.requests.read().await.clone())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<LeaveRequest>, AppError> {
        let requests = self.requests.read().await;
        Ok(requests
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: LeaveRequestId) -> Result<LeaveRequest, AppError> {
        let requests = self.requests.read().await;
        let index = position_of(&requests, id)?;
        Ok(requests[index].clone())
    }

    async fn update_status(
        &self,
        id: LeaveRequestId,
        status: RequestStatus,
        approver_id: UserId,
    ) -> Result<LeaveRequest, AppError> {
        let mut requests = self.requests.write().await;
        let index = position_of(&requests, id)?;
        let request = &mut requests[index];
        request.decide(status, approver_id, Utc::now())?;
        Ok(request.clone())
    }

    async fn cancel(&self, id: LeaveRequestId, user_id: UserId) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let index = position_of(&requests, id)?;
        let request = &requests[index];
        if request.user_id != user_id {
            return Err(AppError::unauthorized(
                "Only the requesting employee can cancel a leave request",
            ));
        }
        if !request.is_pending() {
            return Err(AppError::invalid_transition(id, request.status));
        }
        requests.remove(index);
        Ok(())
    }

    async fn remove(&self, id: LeaveRequestId) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let index = position_of(&requests, id)?;
        requests.remove(index);
        Ok(())
    }
}
