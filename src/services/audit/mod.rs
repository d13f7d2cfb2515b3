//! 审计记录器
//!
//! 尽力而为的旁路通道：审计写入失败绝不能中断主操作，
//! 丢一条审计记录比让学生的提交失败危害小。失败只记一条
//! 本地诊断日志。

use std::sync::Arc;

use tracing::warn;

use crate::models::audit::entities::NewAuditEntry;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AuditRecorder {
    storage: Arc<dyn Storage>,
}

impl AuditRecorder {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 追加一条审计条目，吞掉所有失败
    pub async fn record(&self, entry: NewAuditEntry) {
        let action = entry.action;
        if let Err(e) = self.storage.append_audit_entry(entry).await {
            warn!("Audit write for {} failed (ignored): {}", action, e);
        }
    }
}
