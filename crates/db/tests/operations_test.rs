//! Leave, tasks, incidents, documents and the approvals inbox against a real database.

mod common;

use chrono::{Days, Utc};
use ridgeline_core::approvals::ApprovalKind;
use ridgeline_core::documents::{DocumentCategory, DocumentError, NewDocument, OcrJobStatus, OcrOutcome};
use ridgeline_core::hr::{HrError, LeaveStatus, LeaveType, NewLeaveRequest};
use ridgeline_core::tasks::{NewTask, TaskError, TaskPriority, TaskStatus};
use ridgeline_db::{ApprovalInboxRepository, DocumentRepository, LeaveRepository, TaskRepository};
use ridgeline_shared::types::PageRequest;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[tokio::test]
async fn test_leave_overlap_and_inbox() {
    let Some(db) = common::connect().await else {
        return;
    };
    let employee = Uuid::new_v4();
    let manager = Uuid::new_v4();
    let repo = LeaveRepository::new(db.clone());
    let start = Utc::now().date_naive() + Days::new(30);
    let end = start + Days::new(4);
    let request = |start, end| NewLeaveRequest {
        kind: LeaveType::Annual,
        start_date: start,
        end_date: end,
        working_days: 3,
        reason: None,
    };

    let leave = repo.create(employee, request(start, end)).await.unwrap();
    let err = repo
        .create(employee, request(end, end + Days::new(2)))
        .await
        .unwrap_err();
    assert!(matches!(err, HrError::Overlapping));

    let inbox = ApprovalInboxRepository::new(db.clone())
        .pending(&[ApprovalKind::LeaveRequest], Some(employee), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(inbox.meta.total, 1);
    assert_eq!(inbox.data[0].id, leave.id);

    let approved = repo.approve(leave.id, manager, None).await.unwrap();
    assert_eq!(approved.status, LeaveStatus::Approved.as_str());

    let err = repo.cancel(leave.id, manager).await.unwrap_err();
    assert!(matches!(err, HrError::NotRequester));
    let cancelled = repo.cancel(leave.id, employee).await.unwrap();
    assert_eq!(cancelled.status, LeaveStatus::Cancelled.as_str());
}

#[tokio::test]
async fn test_task_transitions() {
    let Some(db) = common::connect().await else {
        return;
    };
    let creator = Uuid::new_v4();
    let assignee = Uuid::new_v4();
    let repo = TaskRepository::new(db.clone());

    let task = repo
        .create(
            creator,
            NewTask {
                title: "Inspect conveyor CV-3 idlers".into(),
                description: None,
                priority: TaskPriority::High,
                assignee_id: Some(assignee),
                due_date: None,
            },
        )
        .await
        .unwrap();

    let err = repo
        .update_status(task.id, TaskStatus::InProgress, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::NotParticipant));

    let err = repo
        .update_status(task.id, TaskStatus::Done, assignee)
        .await
        .unwrap_err();
    assert!(matches!(err, TaskError::InvalidTransition { .. }));

    repo.update_status(task.id, TaskStatus::InProgress, assignee).await.unwrap();
    let done = repo.update_status(task.id, TaskStatus::Done, assignee).await.unwrap();
    assert!(done.completed_at.is_some());

    let reopened = repo.update_status(task.id, TaskStatus::InProgress, creator).await.unwrap();
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn test_ocr_job_finishes_once() {
    let Some(db) = common::connect().await else {
        return;
    };
    let repo = DocumentRepository::new(db.clone());

    let document = repo
        .register(
            Uuid::new_v4(),
            NewDocument {
                title: "Highveld invoice 0042".into(),
                category: DocumentCategory::Invoice,
                file_url: "https://files.example/invoices/0042.pdf".into(),
                mime_type: "application/pdf".into(),
                size_bytes: Some(182_000),
            },
        )
        .await
        .unwrap();
    let job = &document.ocr_jobs[0];
    assert_eq!(job.status, OcrJobStatus::Queued.as_str());

    repo.start_job(job.id).await.unwrap();
    let outcome = OcrOutcome::Completed {
        extracted_text: "INVOICE 0042 TOTAL 1100.00".into(),
        confidence: dec!(96.4),
    };
    let finished = repo.finish_job(job.id, &outcome).await.unwrap();
    assert_eq!(finished.status, OcrJobStatus::Completed.as_str());
    assert_eq!(finished.confidence, Some(dec!(96.4)));

    let err = repo
        .finish_job(
            job.id,
            &OcrOutcome::Failed {
                error_message: "late failure".into(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DocumentError::InvalidTransition { .. }));
}
