use serde::{Deserialize, Serialize};

// 提交生命周期状态
//
// 状态机：DRAFT → SUBMITTED（学生主动定稿）或 DRAFT → LOCKED
// （截止日期执行器或迟交的 submit 关闭）。SUBMITTED 与 LOCKED
// 均为终态：已提交的提交不会被后续扫描锁定，锁定的提交也不会
// 被再次打开。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Draft,     // 草稿，学生可反复更新附件
    Submitted, // 已提交，等待评分
    Locked,    // 已锁定，错过截止时间
}

impl SubmissionStatus {
    /// 迁移表：只有 DRAFT 可以离开，且只能进入 SUBMITTED 或 LOCKED
    pub fn can_transition_to(self, next: SubmissionStatus) -> bool {
        matches!(
            (self, next),
            (SubmissionStatus::Draft, SubmissionStatus::Submitted)
                | (SubmissionStatus::Draft, SubmissionStatus::Locked)
        )
    }

    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        !matches!(self, SubmissionStatus::Draft)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Draft => write!(f, "draft"),
            SubmissionStatus::Submitted => write!(f, "submitted"),
            SubmissionStatus::Locked => write!(f, "locked"),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(SubmissionStatus::Draft),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "locked" => Ok(SubmissionStatus::Locked),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    // 唯一 ID
    pub id: i64,
    // 关联的作业 ID
    pub assignment_id: i64,
    // 创建时从作业冗余的班级 ID，不得与作业漂移
    pub class_id: i64,
    // 提交学生 ID
    pub student_id: i64,
    // 生命周期状态
    pub status: SubmissionStatus,
    // 附件引用（对本核心不透明）
    pub file_token: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
    // 定稿时间（仅 SUBMITTED 有值）
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_transition_table() {
        assert!(SubmissionStatus::Draft.can_transition_to(SubmissionStatus::Submitted));
        assert!(SubmissionStatus::Draft.can_transition_to(SubmissionStatus::Locked));
        // SUBMITTED 与 LOCKED 均为终态
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Locked));
        assert!(!SubmissionStatus::Submitted.can_transition_to(SubmissionStatus::Draft));
        assert!(!SubmissionStatus::Locked.can_transition_to(SubmissionStatus::Draft));
        assert!(!SubmissionStatus::Locked.can_transition_to(SubmissionStatus::Submitted));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!SubmissionStatus::Draft.is_terminal());
        assert!(SubmissionStatus::Submitted.is_terminal());
        assert!(SubmissionStatus::Locked.is_terminal());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            SubmissionStatus::Draft,
            SubmissionStatus::Submitted,
            SubmissionStatus::Locked,
        ] {
            assert_eq!(
                status.to_string().parse::<SubmissionStatus>().unwrap(),
                status
            );
        }
    }
}
