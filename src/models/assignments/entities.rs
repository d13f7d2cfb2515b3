use serde::{Deserialize, Serialize};

// 作业生命周期状态
//
// 状态机：DRAFT → PUBLISHED（单向，本核心内 PUBLISHED 为终态）。
// 所有合法迁移集中在 can_transition_to 中声明，存储层的条件更新
// 以当前状态为谓词，保证迁移不会被并发写入重复执行。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Draft,     // 草稿，仅教师可见
    Published, // 已发布，接受提交
}

impl AssignmentStatus {
    /// 迁移表：作业只允许 DRAFT → PUBLISHED
    pub fn can_transition_to(self, next: AssignmentStatus) -> bool {
        matches!(
            (self, next),
            (AssignmentStatus::Draft, AssignmentStatus::Published)
        )
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Draft => write!(f, "draft"),
            AssignmentStatus::Published => write!(f, "published"),
        }
    }
}

impl std::str::FromStr for AssignmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(AssignmentStatus::Draft),
            "published" => Ok(AssignmentStatus::Published),
            _ => Err(format!("Invalid assignment status: {s}")),
        }
    }
}

// 作业类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentKind {
    Graded,   // 计分作业，参与截止日期执行
    Material, // 资料发布，无提交要求
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentKind::Graded => write!(f, "graded"),
            AssignmentKind::Material => write!(f, "material"),
        }
    }
}

impl std::str::FromStr for AssignmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "graded" => Ok(AssignmentKind::Graded),
            "material" => Ok(AssignmentKind::Material),
            _ => Err(format!("Invalid assignment kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 关联的班级 ID
    pub class_id: i64,
    // 所属教师 ID
    pub created_by: i64,
    // 作业标题
    pub title: String,
    // 作业描述
    pub description: Option<String>,
    // 作业类型
    pub kind: AssignmentKind,
    // 生命周期状态
    pub status: AssignmentStatus,
    // 作业最高分数
    pub max_score: f64,
    // 作业截止时间
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    // 作业附件引用（对本核心不透明）
    pub file_token: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Assignment {
    /// 作业是否参与截止日期执行：仅已发布、计分且设置了截止时间的作业
    pub fn enforces_deadline(&self) -> bool {
        self.status == AssignmentStatus::Published
            && self.kind == AssignmentKind::Graded
            && self.due_at.is_some()
    }

    /// 截止时间是否已过
    pub fn is_overdue(&self, now: chrono::DateTime<chrono::Utc>) -> bool {
        self.due_at.is_some_and(|due| now > due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_transition_table() {
        assert!(AssignmentStatus::Draft.can_transition_to(AssignmentStatus::Published));
        // 已发布是终态
        assert!(!AssignmentStatus::Published.can_transition_to(AssignmentStatus::Draft));
        assert!(!AssignmentStatus::Published.can_transition_to(AssignmentStatus::Published));
        assert!(!AssignmentStatus::Draft.can_transition_to(AssignmentStatus::Draft));
    }

    #[test]
    fn test_status_round_trip() {
        for status in [AssignmentStatus::Draft, AssignmentStatus::Published] {
            assert_eq!(
                status.to_string().parse::<AssignmentStatus>().unwrap(),
                status
            );
        }
    }
}
