use serde::Deserialize;

use super::entities::AssignmentKind;

/// 发布作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct PublishAssignmentRequest {
    pub teacher_id: i64,
}

/// 创建作业请求（创建后处于 DRAFT 状态）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub kind: AssignmentKind,
    pub max_score: f64,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub file_token: Option<String>,
}
