use tracing::info;

use super::AssignmentService;
use crate::errors::{HWFlowError, Result};
use crate::models::assignments::entities::{Assignment, AssignmentStatus};
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};

/// 发布作业：DRAFT → PUBLISHED
///
/// 重复发布是硬错误而非幂等成功，以免掩盖客户端的重复请求缺陷。
pub async fn publish_assignment(
    service: &AssignmentService,
    assignment_id: i64,
    teacher_id: i64,
) -> Result<Assignment> {
    let assignment = service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("作业 {assignment_id} 不存在")))?;

    // 仅作业所属教师可以发布
    if assignment.created_by != teacher_id {
        return Err(HWFlowError::forbidden(format!(
            "用户 {teacher_id} 不是作业 {assignment_id} 的所属教师"
        )));
    }

    if !assignment
        .status
        .can_transition_to(AssignmentStatus::Published)
    {
        return Err(HWFlowError::invalid_transition(format!(
            "作业 {assignment_id} 当前状态为 {}，无法发布",
            assignment.status
        )));
    }

    // 条件更新兜底：读取与写入之间被并发发布时谓词不命中
    if !service
        .storage
        .mark_assignment_published(assignment_id)
        .await?
    {
        return Err(HWFlowError::invalid_transition(format!(
            "作业 {assignment_id} 已被发布"
        )));
    }

    info!("Assignment {} published by teacher {}", assignment_id, teacher_id);

    service
        .audit
        .record(NewAuditEntry::new(
            ActorRole::Teacher,
            Some(teacher_id),
            AuditAction::AssignmentPublish,
            "assignment",
            Some(assignment_id),
        ))
        .await;

    // 返回发布后的作业
    service
        .storage
        .get_assignment_by_id(assignment_id)
        .await?
        .ok_or_else(|| HWFlowError::not_found(format!("作业 {assignment_id} 不存在")))
}
