use serde::Serialize;

use super::entities::Submission;
use crate::models::grades::entities::Grade;

/// 提交详情响应（附带评分信息，未发布的评分对学生不可见的
/// 过滤由上层网关完成，本核心原样返回）
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: Submission,
    pub grade: Option<Grade>,
}
