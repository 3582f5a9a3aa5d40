use portal_core::{
    error::AppError,
    models::employee::Role,
    models::leave_request::{LeaveType, NewLeaveRequest},
    models::request::RequestStatus,
    services::{LeaveFilter, LeaveWorkflow},
};

#[path = "support/mod.rs"]
mod support;

use support::{date, employee, test_state, vacation};

#[tokio::test]
async fn submit_approve_and_foreign_cancel_scenario() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let approver = employee(1, Role::Manager);
    let stranger = employee(9, Role::Employee);

    let submitted = workflow.submit(&requester, vacation()).await.expect("submit");
    assert_eq!(submitted.status, RequestStatus::Pending);
    assert_eq!(submitted.user_id, requester.user_id);
    assert_eq!(submitted.leave_type, LeaveType::Annual);
    assert_eq!(workflow.find(submitted.id).await.expect("find"), submitted);

    let approved = workflow
        .approve(&approver, submitted.id)
        .await
        .expect("approve");
    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.approved_by, Some(approver.user_id));
    assert!(approved.approved_at.is_some());
    assert_eq!(approved.applied_at, submitted.applied_at);

    let err = workflow.cancel(&stranger, submitted.id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn second_decision_fails_and_keeps_first() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let first_approver = employee(1, Role::Manager);
    let second_approver = employee(2, Role::Admin);

    let submitted = workflow.submit(&requester, vacation()).await.unwrap();
    let rejected = workflow
        .reject(&first_approver, submitted.id, "team is short-staffed")
        .await
        .expect("reject");
    assert_eq!(rejected.status, RequestStatus::Rejected);

    let err = workflow
        .approve(&second_approver, submitted.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidTransition { status: RequestStatus::Rejected, .. }
    ));
    let err = workflow
        .reject(&second_approver, submitted.id, "")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let stored = workflow.find(submitted.id).await.unwrap();
    assert_eq!(stored, rejected);
    assert_eq!(stored.approved_by, Some(first_approver.user_id));
}

#[tokio::test]
async fn owner_cancels_pending_but_not_decided_requests() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let approver = employee(1, Role::Admin);

    let pending = workflow.submit(&requester, vacation()).await.unwrap();
    workflow.cancel(&requester, pending.id).await.expect("cancel");
    assert!(workflow.find(pending.id).await.unwrap_err().is_not_found());

    let decided = workflow.submit(&requester, vacation()).await.unwrap();
    workflow.approve(&approver, decided.id).await.unwrap();
    let err = workflow.cancel(&requester, decided.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    // ownership is checked before status, so a non-owner approver is refused outright
    let err = workflow.cancel(&approver, decided.id).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
    assert!(workflow.find(decided.id).await.is_ok());
}

#[tokio::test]
async fn non_approvers_are_refused_every_admin_action() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let colleague = employee(8, Role::Employee);

    let submitted = workflow.submit(&requester, vacation()).await.unwrap();

    for actor in [&requester, &colleague] {
        assert!(matches!(
            workflow.approve(actor, submitted.id).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            workflow.reject(actor, submitted.id, "nope").await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            workflow.bulk_delete(actor, &[submitted.id]).await,
            Err(AppError::Unauthorized(_))
        ));
    }
    assert!(workflow.find(submitted.id).await.unwrap().is_pending());
    assert!(!workflow.capabilities(&requester).approve_leave);
}

#[tokio::test]
async fn bulk_delete_reports_partial_failure() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let approver = employee(1, Role::Manager);

    let first = workflow.submit(&requester, vacation()).await.unwrap();
    let second = workflow.submit(&requester, vacation()).await.unwrap();
    workflow
        .bulk_delete(&approver, &[second.id])
        .await
        .expect("pre-delete");

    let result = workflow
        .bulk_delete(&approver, &[first.id, second.id])
        .await
        .expect("batch");
    assert_eq!(result.succeeded, vec![first.id]);
    assert_eq!(result.failed.len(), 1);
    assert_eq!(result.failed[0].id, second.id);
    assert!(result.failed[0].error.is_not_found());
    assert!(workflow.find(first.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn approved_requests_can_be_deleted_administratively() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let approver = employee(1, Role::Manager);

    let submitted = workflow.submit(&requester, vacation()).await.unwrap();
    workflow.approve(&approver, submitted.id).await.unwrap();
    let result = workflow
        .bulk_delete(&approver, &[submitted.id])
        .await
        .unwrap();
    assert!(result.is_complete());
    assert!(workflow.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_submissions_are_validation_errors() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);

    let blank = NewLeaveRequest::new(LeaveType::Sick, date(2025, 8, 1), date(2025, 8, 1), " ");
    let reversed =
        NewLeaveRequest::new(LeaveType::Sick, date(2025, 8, 5), date(2025, 8, 1), "flu");
    let missing_end = NewLeaveRequest {
        end_date: None,
        ..vacation()
    };

    for (payload, field) in [(blank, "reason"), (reversed, "end_date"), (missing_end, "end_date")] {
        let err = workflow.submit(&requester, payload).await.unwrap_err();
        assert!(
            matches!(err, AppError::Validation { field: ref f, .. } if f == field),
            "expected validation error on {field}, got {err:?}"
        );
    }
    assert!(workflow.my_requests(&requester).await.unwrap().is_empty());
}

#[tokio::test]
async fn statistics_partition_filtered_results() {
    let state = test_state();
    let workflow = &state.leave_workflow;
    let requester = employee(7, Role::Employee);
    let approver = employee(1, Role::Manager);

    let mut ids = Vec::new();
    for _ in 0..6 {
        ids.push(workflow.submit(&requester, vacation()).await.unwrap().id);
    }
    workflow.approve(&approver, ids[0]).await.unwrap();
    workflow.approve(&approver, ids[1]).await.unwrap();
    workflow.reject(&approver, ids[2], "overlap").await.unwrap();

    let all = workflow.list_all().await.unwrap();
    let stats = LeaveWorkflow::statistics(&all);
    assert_eq!(stats.total, 6);
    assert_eq!(stats.pending, 3);
    assert_eq!(stats.approved, 2);
    assert_eq!(stats.rejected, 1);

    for status in [RequestStatus::Pending, RequestStatus::Approved, RequestStatus::Rejected] {
        let filtered = workflow
            .filter(&LeaveFilter {
                status: Some(status),
                ..Default::default()
            })
            .await
            .unwrap();
        let stats = LeaveWorkflow::statistics(&filtered);
        let (matching, others) = match status {
            RequestStatus::Pending => (stats.pending, stats.approved + stats.rejected),
            RequestStatus::Approved => (stats.approved, stats.pending + stats.rejected),
            RequestStatus::Rejected => (stats.rejected, stats.pending + stats.approved),
        };
        assert_eq!(matching, filtered.len());
        assert_eq!(others, 0);
        assert_eq!(stats.total, stats.pending + stats.approved + stats.rejected);
    }
}

#[tokio::test]
async fn concurrent_decisions_apply_exactly_once() {
    let state = test_state();
    let requester = employee(7, Role::Employee);
    let submitted = state
        .leave_workflow
        .submit(&requester, vacation())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for approver_id in 1..=8 {
        let workflow = state.leave_workflow.clone();
        let id = submitted.id;
        handles.push(tokio::spawn(async move {
            let approver = employee(approver_id, Role::Manager);
            workflow.approve(&approver, id).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(_) => successes += 1,
            Err(err) => assert!(matches!(err, AppError::InvalidTransition { .. })),
        }
    }
    assert_eq!(successes, 1);
}
