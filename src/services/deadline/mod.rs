pub mod sweep;

use std::sync::Arc;

use crate::errors::Result;
use crate::services::AuditRecorder;
use crate::storage::Storage;

/// 截止日期执行器
///
/// 不是实体状态机，而是批量对账：周期性扫描过期作业并锁定其
/// 下仍为草稿的提交。只作用于 DRAFT 行，天然幂等，重复或重叠
/// 执行均安全，多实例部署也不需要分布式锁。
pub struct DeadlineService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) audit: AuditRecorder,
}

impl DeadlineService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let audit = AuditRecorder::new(storage.clone());
        Self { storage, audit }
    }

    /// 执行一次扫描，返回锁定的提交数
    pub async fn run_sweep(&self) -> Result<u64> {
        sweep::run_sweep(self).await
    }
}
