use tracing::info;

use super::SubmissionService;
use crate::errors::{HWFlowError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};
use crate::models::submissions::entities::{Submission, SubmissionStatus};

/// 定稿提交：DRAFT → SUBMITTED
///
/// 截止时间在最终写入前复查一次：若已过期，迁移改为 DRAFT → LOCKED
/// 且调用仍以 `DeadlineExceeded` 失败——迟到的尝试绝不能静默地保持
/// 可编辑。与截止扫描的竞争由条件更新解决：双方都只把提交移出
/// DRAFT 一次，谁先命中谓词谁生效。
pub async fn submit(
    service: &SubmissionService,
    submission_id: i64,
    student_id: i64,
) -> Result<Submission> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("提交 {submission_id} 不存在")))?;

    // 仅提交归属的学生可以定稿
    if submission.student_id != student_id {
        return Err(HWFlowError::forbidden(format!(
            "学生 {student_id} 不是提交 {submission_id} 的所有者"
        )));
    }

    if submission.status != SubmissionStatus::Draft {
        return Err(HWFlowError::invalid_transition(format!(
            "提交 {submission_id} 当前状态为 {}，无法定稿",
            submission.status
        )));
    }

    // 复核作业仍然已发布
    let assignment = service
        .storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            HWFlowError::not_found(format!("作业 {} 不存在", submission.assignment_id))
        })?;

    if assignment.status != AssignmentStatus::Published {
        return Err(HWFlowError::precondition_failed(format!(
            "作业 {} 尚未发布",
            assignment.id
        )));
    }

    // 截止时间二次检查：迟交改走 DRAFT → LOCKED
    let now = chrono::Utc::now();
    if assignment.is_overdue(now) {
        let locked = service
            .storage
            .transition_submission(
                submission_id,
                SubmissionStatus::Draft,
                SubmissionStatus::Locked,
            )
            .await?;

        if locked {
            info!("Submission {} locked on late submit attempt", submission_id);
            service
                .audit
                .record(NewAuditEntry::new(
                    ActorRole::Student,
                    Some(student_id),
                    AuditAction::SubmissionLock,
                    "submission",
                    Some(submission_id),
                ))
                .await;
        }

        return Err(HWFlowError::deadline_exceeded(format!(
            "作业 {} 已过截止时间，提交被锁定",
            assignment.id
        )));
    }

    // 条件迁移：与并发 submit 或截止扫描竞争时至多一方命中
    if !service
        .storage
        .transition_submission(
            submission_id,
            SubmissionStatus::Draft,
            SubmissionStatus::Submitted,
        )
        .await?
    {
        return Err(HWFlowError::invalid_transition(format!(
            "提交 {submission_id} 已不在草稿状态"
        )));
    }

    service
        .audit
        .record(NewAuditEntry::new(
            ActorRole::Student,
            Some(student_id),
            AuditAction::SubmissionSubmit,
            "submission",
            Some(submission_id),
        ))
        .await;

    service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("提交 {submission_id} 不存在")))
}
