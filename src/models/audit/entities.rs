use serde::{Deserialize, Serialize};

// 审计操作者角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Teacher,
    Student,
    System, // 截止日期执行器等后台任务
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Teacher => write!(f, "teacher"),
            ActorRole::Student => write!(f, "student"),
            ActorRole::System => write!(f, "system"),
        }
    }
}

// 审计动作名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    AssignmentPublish,
    SubmissionDraft,
    SubmissionSubmit,
    SubmissionLock,
    GradeSave,
    GradePublish,
    DeadlineSweep,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AuditAction::AssignmentPublish => "assignment.publish",
            AuditAction::SubmissionDraft => "submission.draft",
            AuditAction::SubmissionSubmit => "submission.submit",
            AuditAction::SubmissionLock => "submission.lock",
            AuditAction::GradeSave => "grade.save",
            AuditAction::GradePublish => "grade.publish",
            AuditAction::DeadlineSweep => "deadline.sweep",
        };
        write!(f, "{name}")
    }
}

/// 待写入的审计条目
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub actor_role: ActorRole,
    pub actor_id: Option<i64>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub metadata: Option<serde_json::Value>,
}

impl NewAuditEntry {
    pub fn new(
        actor_role: ActorRole,
        actor_id: Option<i64>,
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: Option<i64>,
    ) -> Self {
        Self {
            actor_role,
            actor_id,
            action,
            entity_type: entity_type.into(),
            entity_id,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// 已落库的审计条目（不可修改，不可删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: i64,
    pub actor_role: String,
    pub actor_id: Option<i64>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub metadata: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
