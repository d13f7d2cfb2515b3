use serde::Deserialize;

/// 保存评分请求（创建或更新未发布的评分）
#[derive(Debug, Clone, Deserialize)]
pub struct SaveGradeRequest {
    pub teacher_id: i64,
    pub score: f64,
    pub feedback: Option<String>,
}

/// 发布评分请求
#[derive(Debug, Clone, Deserialize)]
pub struct PublishGradeRequest {
    pub teacher_id: i64,
}
