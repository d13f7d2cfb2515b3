use serde::Deserialize;

/// 创建或更新提交草稿请求
///
/// 文件已由外部存储服务接收，这里只持有其引用。
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDraftRequest {
    pub assignment_id: i64,
    pub student_id: i64,
    pub file_token: String,
}

/// 定稿提交请求
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub student_id: i64,
}
