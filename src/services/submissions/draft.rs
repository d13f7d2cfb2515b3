use super::SubmissionService;
use crate::errors::{HWFlowError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 创建或更新提交草稿
///
/// 首次调用创建草稿，后续调用仅刷新附件引用，状态保持 DRAFT。
/// 检查顺序：作业存在 → 已发布 → 未过截止 → 学生是班级成员 →
/// 已有提交仍为 DRAFT。
pub async fn upsert_draft(
    service: &SubmissionService,
    student_id: i64,
    assignment_id: i64,
    file_token: &str,
) -> Result<Submission> {
    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("作业 {assignment_id} 不存在")))?;

    if assignment.status != AssignmentStatus::Published {
        return Err(HWFlowError::precondition_failed(format!(
            "作业 {assignment_id} 尚未发布"
        )));
    }

    let now = chrono::Utc::now();
    if assignment.is_overdue(now) {
        return Err(HWFlowError::deadline_exceeded(format!(
            "作业 {assignment_id} 已过截止时间"
        )));
    }

    // 班级成员资格检查
    if service
        .storage
        .get_class_user(assignment.class_id, student_id)
        .await?
        .is_none()
    {
        return Err(HWFlowError::forbidden(format!(
            "学生 {student_id} 不是班级 {} 的成员",
            assignment.class_id
        )));
    }

    let existing = service
        .storage
        .get_submission_by_assignment_and_student(assignment_id, student_id)
        .await?;

    let submission = match existing {
        None => {
            // 班级 ID 从父作业冗余，之后不得漂移
            service
                .storage
                .create_submission(assignment_id, assignment.class_id, student_id, file_token)
                .await?
        }
        Some(submission) => {
            if submission.status != SubmissionStatus::Draft {
                return Err(HWFlowError::invalid_transition(format!(
                    "提交 {} 当前状态为 {}，不可再编辑",
                    submission.id, submission.status
                )));
            }
            // 条件刷新：若此刻已被扫描锁定则谓词不命中
            if !service
                .storage
                .refresh_draft_file(submission.id, file_token)
                .await?
            {
                return Err(HWFlowError::invalid_transition(format!(
                    "提交 {} 已不在草稿状态",
                    submission.id
                )));
            }
            service
                .storage
                .get_submission_by_id(submission.id)
                .await?
                .ok_or_else(|| HWFlowError::not_found(format!("提交 {} 不存在", submission.id)))?
        }
    };

    service
        .audit
        .record(NewAuditEntry::new(
            ActorRole::Student,
            Some(student_id),
            AuditAction::SubmissionDraft,
            "submission",
            Some(submission.id),
        ))
        .await;

    Ok(submission)
}
