use tracing::{debug, info};

use super::DeadlineService;
use crate::errors::Result;
use crate::models::audit::entities::{ActorRole, AuditAction, NewAuditEntry};

/// 一次截止扫描
///
/// 1. 找出截止时间已过的已发布计分作业；
/// 2. 一条批量条件更新锁定其下仍为 DRAFT 的提交；
/// 3. 整次扫描只记一条汇总审计（锁定数），不逐条记录。
pub async fn run_sweep(service: &DeadlineService) -> Result<u64> {
    let now = chrono::Utc::now();

    let assignment_ids = service
        .storage
        .list_overdue_graded_assignment_ids(now)
        .await?;

    if assignment_ids.is_empty() {
        debug!("Deadline sweep: no overdue assignments");
        return Ok(0);
    }

    let locked = service
        .storage
        .lock_draft_submissions(&assignment_ids)
        .await?;

    if locked > 0 {
        info!(
            "Deadline sweep locked {} submissions across {} assignments",
            locked,
            assignment_ids.len()
        );

        service
            .audit
            .record(
                NewAuditEntry::new(
                    ActorRole::System,
                    None,
                    AuditAction::DeadlineSweep,
                    "sweep",
                    None,
                )
                .with_metadata(serde_json::json!({
                    "locked": locked,
                    "assignments": assignment_ids.len(),
                })),
            )
            .await;
    } else {
        debug!(
            "Deadline sweep: {} overdue assignments, nothing left to lock",
            assignment_ids.len()
        );
    }

    Ok(locked)
}
