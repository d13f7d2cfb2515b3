//! 截止日期调度器
//!
//! 以固定周期驱动截止日期执行器。单次扫描失败视为瞬态故障，
//! 只记日志不退出；扫描只作用于仍为 DRAFT 的行，下一个周期
//! 重跑即自愈。

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::services::DeadlineService;

/// 启动调度循环，返回任务句柄
pub fn spawn_deadline_scheduler(
    service: Arc<DeadlineService>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 错过的 tick 顺延，不追赶
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match service.run_sweep().await {
                Ok(locked) => {
                    debug!("Deadline sweep tick completed, locked {}", locked);
                }
                Err(e) => {
                    warn!("Deadline sweep failed, retrying next tick: {}", e);
                }
            }
        }
    })
}
