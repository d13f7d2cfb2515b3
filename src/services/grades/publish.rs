use tracing::info;

use super::GradeService;
use crate::errors::{HWFlowError, Result};
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};
use crate::models::grades::entities::Grade;

/// 发布评分
///
/// published 置位后评分即为终态，本核心不暴露任何撤销路径。
pub async fn publish_grade(
    service: &GradeService,
    grade_id: i64,
    teacher_id: i64,
) -> Result<Grade> {
    let grade = service
        .storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("评分 {grade_id} 不存在")))?;

    // 通过提交回溯到作业做所有权检查
    let submission = service
        .storage
        .get_submission_by_id(grade.submission_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("提交 {} 不存在", grade.submission_id)))?;

    let assignment = service
        .storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            HWFlowError::not_found(format!("作业 {} 不存在", submission.assignment_id))
        })?;

    if assignment.created_by != teacher_id {
        return Err(HWFlowError::forbidden(format!(
            "用户 {teacher_id} 不是作业 {} 的所属教师",
            assignment.id
        )));
    }

    if grade.published {
        return Err(HWFlowError::invalid_transition(format!(
            "评分 {grade_id} 已发布"
        )));
    }

    // 条件发布：并发的重复发布至多一方命中
    if !service.storage.mark_grade_published(grade_id).await? {
        return Err(HWFlowError::invalid_transition(format!(
            "评分 {grade_id} 已发布"
        )));
    }

    info!("Grade {} published by teacher {}", grade_id, teacher_id);

    service
        .audit
        .record(NewAuditEntry::new(
            ActorRole::Teacher,
            Some(teacher_id),
            AuditAction::GradePublish,
            "grade",
            Some(grade_id),
        ))
        .await;

    service
        .storage
        .get_grade_by_id(grade_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("评分 {grade_id} 不存在")))
}
