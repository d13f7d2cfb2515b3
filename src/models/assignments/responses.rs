use serde::Serialize;

/// 截止扫描结果响应
#[derive(Debug, Serialize)]
pub struct SweepResponse {
    // 本次扫描锁定的提交数量
    pub locked: u64,
}
