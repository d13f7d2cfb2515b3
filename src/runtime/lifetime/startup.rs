use std::sync::Arc;

use tracing::warn;

use crate::storage::{Storage, create_storage};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 服务启动前预处理：初始化存储并运行迁移
pub async fn prepare_server_startup() -> StartupContext {
    let storage = match create_storage().await {
        Ok(storage) => storage,
        Err(e) => {
            warn!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };

    StartupContext { storage }
}
