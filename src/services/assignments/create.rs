use super::AssignmentService;
use crate::errors::{HWFlowError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::models::class_users::entities::ClassUserRole;

/// 创建作业
///
/// 仅班级内的教师可以创建；创建后处于 DRAFT 状态，对学生不可见。
pub async fn create_assignment(
    service: &AssignmentService,
    teacher_id: i64,
    req: CreateAssignmentRequest,
) -> Result<Assignment> {
    if req.max_score <= 0.0 || !req.max_score.is_finite() {
        return Err(HWFlowError::validation(format!(
            "非法的最高分数: {}",
            req.max_score
        )));
    }

    // 班级成员资格与角色检查
    let membership = service
        .storage
        .get_class_user(req.class_id, teacher_id)
        .await?;
    match membership {
        Some(cu) if cu.role == ClassUserRole::Teacher => {}
        _ => {
            return Err(HWFlowError::forbidden(format!(
                "用户 {teacher_id} 不是班级 {} 的教师",
                req.class_id
            )));
        }
    }

    service.storage.create_assignment(teacher_id, req).await
}
