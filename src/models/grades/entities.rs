use serde::{Deserialize, Serialize};

// 评分记录
//
// 每个提交至多一条评分（submission_id 唯一约束）。未发布时教师可
// 反复修改分数与评语；published 置位后记录不可变，本核心不提供
// 撤销发布的操作。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    // 唯一 ID
    pub id: i64,
    // 关联的提交 ID（唯一）
    pub submission_id: i64,
    // 评分教师 ID
    pub grader_id: i64,
    // 分数，0 ..= 作业最高分
    pub score: f64,
    // 评语
    pub feedback: Option<String>,
    // 是否已发布，发布后不可修改
    pub published: bool,
    // 首次评分时间
    pub graded_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
