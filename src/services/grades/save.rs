use super::GradeService;
use crate::errors::{HWFlowError, Result};
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};
use crate::models::grades::entities::Grade;
use crate::models::submissions::entities::SubmissionStatus;

/// 保存评分
///
/// 每个提交至多一条评分，"创建还是更新"先读后写解决，唯一约束兜底。
/// 检查顺序：提交存在 → 提交为 SUBMITTED → 教师是作业所有者 →
/// 分数在 [0, max_score] 内 → 评分尚未发布。
pub async fn save_grade(
    service: &GradeService,
    submission_id: i64,
    teacher_id: i64,
    score: f64,
    feedback: Option<String>,
) -> Result<Grade> {
    let submission = service
        .storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("提交 {submission_id} 不存在")))?;

    // 草稿与锁定的提交都不可评分
    if submission.status != SubmissionStatus::Submitted {
        return Err(HWFlowError::precondition_failed(format!(
            "提交 {submission_id} 当前状态为 {}，不可评分",
            submission.status
        )));
    }

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

    if !score.is_finite() || score < 0.0 || score > assignment.max_score {
        return Err(HWFlowError::invalid_range(format!(
            "分数 {score} 超出范围 [0, {}]",
            assignment.max_score
        )));
    }

    let existing = service
        .storage
        .get_grade_by_submission_id(submission_id)
        .await?;

    let grade = match existing {
        None => {
            service
                .storage
                .create_grade(submission_id, teacher_id, score, feedback)
                .await?
        }
        Some(grade) => {
            if grade.published {
                return Err(HWFlowError::immutable(format!(
                    "评分 {} 已发布，不可修改",
                    grade.id
                )));
            }
            // 条件更新：读取后被并发发布时谓词不命中
            if !service
                .storage
                .update_unpublished_grade(grade.id, score, feedback)
                .await?
            {
                return Err(HWFlowError::immutable(format!(
                    "评分 {} 已发布，不可修改",
                    grade.id
                )));
            }
            service
                .storage
                .get_grade_by_id(grade.id)
                .await?
                .ok_or_else(|| HWFlowError::not_found(format!("评分 {} 不存在", grade.id)))?
        }
    };

    service
        .audit
        .record(NewAuditEntry::new(
            ActorRole::Teacher,
            Some(teacher_id),
            AuditAction::GradeSave,
            "grade",
            Some(grade.id),
        ))
        .await;

    Ok(grade)
}
