//! 作业 → 提交 → 评分生命周期集成测试
//!
//! 使用内存 SQLite 走真实的 SeaORM 存储与迁移。

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use rust_hwflow::errors::HWFlowError;
use rust_hwflow::models::assignments::entities::{Assignment, AssignmentKind, AssignmentStatus};
use rust_hwflow::models::assignments::requests::CreateAssignmentRequest;
use rust_hwflow::models::class_users::entities::ClassUserRole;
use rust_hwflow::models::submissions::entities::SubmissionStatus;
use rust_hwflow::services::{AssignmentService, DeadlineService, GradeService, SubmissionService};
use rust_hwflow::storage::{Storage, sea_orm_storage::SeaOrmStorage};

const TEACHER: i64 = 1;
const OTHER_TEACHER: i64 = 2;
const STUDENT: i64 = 10;
const OTHER_STUDENT: i64 = 11;
const OUTSIDER: i64 = 99;

async fn setup_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::new_with_url(":memory:", 1, 5)
        .await
        .expect("storage init");
    Arc::new(storage)
}

/// 建一个班级：TEACHER 为教师，STUDENT/OTHER_STUDENT 为学生
async fn seed_class(storage: &Arc<dyn Storage>) -> i64 {
    let class = storage.create_class(TEACHER, "2025 秋季物理").await.unwrap();
    storage
        .join_class(class.id, TEACHER, ClassUserRole::Teacher)
        .await
        .unwrap();
    storage
        .join_class(class.id, STUDENT, ClassUserRole::Student)
        .await
        .unwrap();
    storage
        .join_class(class.id, OTHER_STUDENT, ClassUserRole::Student)
        .await
        .unwrap();
    class.id
}

fn assignment_request(class_id: i64, due_at: Option<DateTime<Utc>>) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        class_id,
        title: "实验报告一".to_string(),
        description: Some("测量重力加速度".to_string()),
        kind: AssignmentKind::Graded,
        max_score: 100.0,
        due_at,
        file_token: None,
    }
}

/// 创建并发布一个作业
async fn seed_published_assignment(
    storage: &Arc<dyn Storage>,
    due_at: Option<DateTime<Utc>>,
) -> Assignment {
    let class_id = seed_class(storage).await;
    let service = AssignmentService::new(storage.clone());
    let assignment = service
        .create_assignment(TEACHER, assignment_request(class_id, due_at))
        .await
        .unwrap();
    service
        .publish_assignment(assignment.id, TEACHER)
        .await
        .unwrap()
}

// 截止时间在库中按整秒截断存储，扫描用严格小于比较，
// 所以睡眠必须超出截止间隔一整秒以上才能保证跨过截止秒
fn in_future(secs: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::seconds(secs)
}

// ---------------------------------------------------------------------------
// 作业状态机
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_by_non_owner_is_forbidden_and_stays_draft() {
    let storage = setup_storage().await;
    let class_id = seed_class(&storage).await;
    let service = AssignmentService::new(storage.clone());

    let assignment = service
        .create_assignment(TEACHER, assignment_request(class_id, None))
        .await
        .unwrap();
    assert_eq!(assignment.status, AssignmentStatus::Draft);

    let err = service
        .publish_assignment(assignment.id, OTHER_TEACHER)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::Forbidden(_)));

    // 作业保持 DRAFT
    let reloaded = service.get_assignment(assignment.id).await.unwrap().unwrap();
    assert_eq!(reloaded.status, AssignmentStatus::Draft);
}

#[tokio::test]
async fn publish_twice_is_invalid_transition() {
    let storage = setup_storage().await;
    let class_id = seed_class(&storage).await;
    let service = AssignmentService::new(storage.clone());

    let assignment = service
        .create_assignment(TEACHER, assignment_request(class_id, None))
        .await
        .unwrap();

    let published = service
        .publish_assignment(assignment.id, TEACHER)
        .await
        .unwrap();
    assert_eq!(published.status, AssignmentStatus::Published);

    // 重复发布是硬错误而非幂等成功
    let err = service
        .publish_assignment(assignment.id, TEACHER)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidTransition(_)));
}

#[tokio::test]
async fn publish_missing_assignment_is_not_found() {
    let storage = setup_storage().await;
    seed_class(&storage).await;
    let service = AssignmentService::new(storage.clone());

    let err = service.publish_assignment(12345, TEACHER).await.unwrap_err();
    assert!(matches!(err, HWFlowError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// 提交状态机：草稿
// ---------------------------------------------------------------------------

#[tokio::test]
async fn draft_upsert_creates_then_refreshes_single_row() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = SubmissionService::new(storage.clone());

    let first = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();
    assert_eq!(first.status, SubmissionStatus::Draft);
    assert_eq!(first.file_token, "file-v1");
    // 班级 ID 从父作业冗余
    assert_eq!(first.class_id, assignment.class_id);

    let second = service
        .upsert_draft(STUDENT, assignment.id, "file-v2")
        .await
        .unwrap();
    // 同一 (作业, 学生) 至多一条提交
    assert_eq!(second.id, first.id);
    assert_eq!(second.status, SubmissionStatus::Draft);
    assert_eq!(second.file_token, "file-v2");
}

#[tokio::test]
async fn draft_on_unpublished_assignment_is_precondition_failed() {
    let storage = setup_storage().await;
    let class_id = seed_class(&storage).await;
    let assignments = AssignmentService::new(storage.clone());
    let assignment = assignments
        .create_assignment(TEACHER, assignment_request(class_id, None))
        .await
        .unwrap();

    let service = SubmissionService::new(storage.clone());
    let err = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::PreconditionFailed(_)));
}

#[tokio::test]
async fn draft_by_non_member_is_forbidden() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = SubmissionService::new(storage.clone());

    let err = service
        .upsert_draft(OUTSIDER, assignment.id, "file-v1")
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::Forbidden(_)));
}

#[tokio::test]
async fn draft_after_deadline_is_deadline_exceeded() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(1))).await;
    let service = SubmissionService::new(storage.clone());

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let err = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::DeadlineExceeded(_)));
}

#[tokio::test]
async fn draft_on_missing_assignment_is_not_found() {
    let storage = setup_storage().await;
    seed_class(&storage).await;
    let service = SubmissionService::new(storage.clone());

    let err = service.upsert_draft(STUDENT, 4242, "file-v1").await.unwrap_err();
    assert!(matches!(err, HWFlowError::NotFound(_)));
}

// ---------------------------------------------------------------------------
// 提交状态机：定稿
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_before_deadline_succeeds() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = SubmissionService::new(storage.clone());

    let draft = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();
    let submitted = service.submit(draft.id, STUDENT).await.unwrap();

    assert_eq!(submitted.status, SubmissionStatus::Submitted);
    assert!(submitted.submitted_at.is_some());
}

#[tokio::test]
async fn late_submit_locks_and_fails_with_deadline_exceeded() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(2))).await;
    let service = SubmissionService::new(storage.clone());

    let draft = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    // 迟到的定稿失败，但状态仍然发生迁移：DRAFT → LOCKED
    let err = service.submit(draft.id, STUDENT).await.unwrap_err();
    assert!(matches!(err, HWFlowError::DeadlineExceeded(_)));

    let reloaded = service.get_submission(draft.id).await.unwrap().unwrap();
    assert_eq!(reloaded.submission.status, SubmissionStatus::Locked);
}

#[tokio::test]
async fn submit_by_non_owner_is_forbidden() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = SubmissionService::new(storage.clone());

    let draft = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();

    let err = service.submit(draft.id, OTHER_STUDENT).await.unwrap_err();
    assert!(matches!(err, HWFlowError::Forbidden(_)));
}

#[tokio::test]
async fn submit_twice_is_invalid_transition() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = SubmissionService::new(storage.clone());

    let draft = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();
    service.submit(draft.id, STUDENT).await.unwrap();

    let err = service.submit(draft.id, STUDENT).await.unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidTransition(_)));

    // 定稿后草稿更新也被拒绝
    let err = service
        .upsert_draft(STUDENT, assignment.id, "file-v2")
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidTransition(_)));
}

#[tokio::test]
async fn concurrent_submits_exactly_one_wins() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let service = Arc::new(SubmissionService::new(storage.clone()));

    let draft = service
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        service.submit(draft.id, STUDENT),
        service.submit(draft.id, STUDENT)
    );

    // 恰有一方成功，另一方观察到非 DRAFT 状态
    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    let loss = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(
        loss.as_ref().unwrap_err(),
        HWFlowError::InvalidTransition(_)
    ));

    let reloaded = service.get_submission(draft.id).await.unwrap().unwrap();
    assert_eq!(reloaded.submission.status, SubmissionStatus::Submitted);
}

// ---------------------------------------------------------------------------
// 截止日期执行器
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sweep_locks_drafts_and_is_idempotent() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(2))).await;
    let submissions = SubmissionService::new(storage.clone());

    submissions
        .upsert_draft(STUDENT, assignment.id, "file-a")
        .await
        .unwrap();
    submissions
        .upsert_draft(OTHER_STUDENT, assignment.id, "file-b")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let deadline = DeadlineService::new(storage.clone());
    let locked = deadline.run_sweep().await.unwrap();
    assert_eq!(locked, 2);

    // 无新写入时重跑是空操作
    let locked_again = deadline.run_sweep().await.unwrap();
    assert_eq!(locked_again, 0);
}

#[tokio::test]
async fn sweep_appends_retrievable_summary_audit_entry() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(2))).await;
    let submissions = SubmissionService::new(storage.clone());

    submissions
        .upsert_draft(STUDENT, assignment.id, "file-a")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let deadline = DeadlineService::new(storage.clone());
    let locked = deadline.run_sweep().await.unwrap();
    assert_eq!(locked, 1);

    // 汇总条目没有实体 ID，按类型取出
    let entries = storage.list_audit_entries("sweep", None).await.unwrap();
    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert_eq!(entry.action, "deadline.sweep");
    assert_eq!(entry.actor_role, "system");
    assert_eq!(entry.entity_id, None);

    let metadata: serde_json::Value =
        serde_json::from_str(entry.metadata.as_deref().unwrap()).unwrap();
    assert_eq!(metadata["locked"], 1);
    assert_eq!(metadata["assignments"], 1);

    // 空扫描不追加新条目
    deadline.run_sweep().await.unwrap();
    let entries = storage.list_audit_entries("sweep", None).await.unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn sweep_never_touches_submitted_submissions() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(2))).await;
    let submissions = SubmissionService::new(storage.clone());

    let draft = submissions
        .upsert_draft(STUDENT, assignment.id, "file-a")
        .await
        .unwrap();
    let submitted = submissions.submit(draft.id, STUDENT).await.unwrap();
    assert_eq!(submitted.status, SubmissionStatus::Submitted);

    tokio::time::sleep(Duration::from_millis(3500)).await;

    // SUBMITTED 是终态，扫描不会把它改成 LOCKED
    let deadline = DeadlineService::new(storage.clone());
    let locked = deadline.run_sweep().await.unwrap();
    assert_eq!(locked, 0);

    let reloaded = submissions.get_submission(draft.id).await.unwrap().unwrap();
    assert_eq!(reloaded.submission.status, SubmissionStatus::Submitted);
}

#[tokio::test]
async fn sweep_ignores_material_and_unpublished_assignments() {
    let storage = setup_storage().await;
    let class_id = seed_class(&storage).await;
    let assignments = AssignmentService::new(storage.clone());

    // 资料类作业：有截止时间也不参与截止执行
    let mut material = assignment_request(class_id, Some(in_future(1)));
    material.kind = AssignmentKind::Material;
    let material = assignments
        .create_assignment(TEACHER, material)
        .await
        .unwrap();
    assignments
        .publish_assignment(material.id, TEACHER)
        .await
        .unwrap();

    // 草稿作业：从不参与
    assignments
        .create_assignment(TEACHER, assignment_request(class_id, Some(in_future(1))))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;

    let deadline = DeadlineService::new(storage.clone());
    let locked = deadline.run_sweep().await.unwrap();
    assert_eq!(locked, 0);
}

// ---------------------------------------------------------------------------
// 评分工作流
// ---------------------------------------------------------------------------

async fn seed_submitted_submission(storage: &Arc<dyn Storage>) -> (Assignment, i64) {
    let assignment = seed_published_assignment(storage, Some(in_future(3600))).await;
    let submissions = SubmissionService::new(storage.clone());
    let draft = submissions
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();
    submissions.submit(draft.id, STUDENT).await.unwrap();
    (assignment, draft.id)
}

#[tokio::test]
async fn published_grade_is_immutable() {
    let storage = setup_storage().await;
    let (_, submission_id) = seed_submitted_submission(&storage).await;
    let service = GradeService::new(storage.clone());

    let grade = service
        .save_grade(submission_id, TEACHER, 85.0, Some("不错".to_string()))
        .await
        .unwrap();
    assert!(!grade.published);

    let published = service.publish_grade(grade.id, TEACHER).await.unwrap();
    assert!(published.published);

    // 发布后修改被拒绝，分数保持 85
    let err = service
        .save_grade(submission_id, TEACHER, 90.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::Immutable(_)));

    let reloaded = service.get_grade(grade.id).await.unwrap().unwrap();
    assert_eq!(reloaded.score, 85.0);
    assert_eq!(reloaded.feedback.as_deref(), Some("不错"));
}

#[tokio::test]
async fn save_grade_updates_single_row_until_published() {
    let storage = setup_storage().await;
    let (_, submission_id) = seed_submitted_submission(&storage).await;
    let service = GradeService::new(storage.clone());

    let first = service
        .save_grade(submission_id, TEACHER, 60.0, None)
        .await
        .unwrap();
    let second = service
        .save_grade(submission_id, TEACHER, 75.0, Some("复核后调整".to_string()))
        .await
        .unwrap();

    // 每个提交至多一条评分
    assert_eq!(second.id, first.id);
    assert_eq!(second.score, 75.0);
    assert!(!second.published);
}

#[tokio::test]
async fn grade_requires_submitted_state() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let submissions = SubmissionService::new(storage.clone());
    let draft = submissions
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();

    // 草稿不可评分
    let service = GradeService::new(storage.clone());
    let err = service
        .save_grade(draft.id, TEACHER, 50.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::PreconditionFailed(_)));
}

#[tokio::test]
async fn grade_by_non_owner_is_forbidden() {
    let storage = setup_storage().await;
    let (_, submission_id) = seed_submitted_submission(&storage).await;
    let service = GradeService::new(storage.clone());

    let err = service
        .save_grade(submission_id, OTHER_TEACHER, 50.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::Forbidden(_)));
}

#[tokio::test]
async fn grade_score_out_of_range_is_rejected() {
    let storage = setup_storage().await;
    let (_, submission_id) = seed_submitted_submission(&storage).await;
    let service = GradeService::new(storage.clone());

    let err = service
        .save_grade(submission_id, TEACHER, 120.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidRange(_)));

    let err = service
        .save_grade(submission_id, TEACHER, -1.0, None)
        .await
        .unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidRange(_)));
}

#[tokio::test]
async fn publish_grade_twice_is_invalid_transition() {
    let storage = setup_storage().await;
    let (_, submission_id) = seed_submitted_submission(&storage).await;
    let service = GradeService::new(storage.clone());

    let grade = service
        .save_grade(submission_id, TEACHER, 85.0, None)
        .await
        .unwrap();
    service.publish_grade(grade.id, TEACHER).await.unwrap();

    let err = service.publish_grade(grade.id, TEACHER).await.unwrap_err();
    assert!(matches!(err, HWFlowError::InvalidTransition(_)));
}

// ---------------------------------------------------------------------------
// 审计日志
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lifecycle_actions_append_audit_entries() {
    let storage = setup_storage().await;
    let assignment = seed_published_assignment(&storage, Some(in_future(3600))).await;
    let submissions = SubmissionService::new(storage.clone());

    let draft = submissions
        .upsert_draft(STUDENT, assignment.id, "file-v1")
        .await
        .unwrap();
    submissions.submit(draft.id, STUDENT).await.unwrap();

    let assignment_entries = storage
        .list_audit_entries("assignment", Some(assignment.id))
        .await
        .unwrap();
    assert!(
        assignment_entries
            .iter()
            .any(|e| e.action == "assignment.publish")
    );

    let submission_entries = storage
        .list_audit_entries("submission", Some(draft.id))
        .await
        .unwrap();
    assert!(
        submission_entries
            .iter()
            .any(|e| e.action == "submission.draft")
    );
    assert!(
        submission_entries
            .iter()
            .any(|e| e.action == "submission.submit")
    );
}
