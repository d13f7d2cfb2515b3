//! 审计日志存储操作（只追加）

use super::SeaOrmStorage;
use crate::entity::audit_log::{ActiveModel, Column, Entity as AuditLog};
use crate::errors::{HWFlowError, Result};
use crate::models::audit::entities::{AuditLogEntry, NewAuditEntry};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 追加审计条目
    pub async fn append_audit_entry_impl(&self, entry: NewAuditEntry) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            actor_role: Set(entry.actor_role.to_string()),
            actor_id: Set(entry.actor_id),
            action: Set(entry.action.to_string()),
            entity_type: Set(entry.entity_type),
            entity_id: Set(entry.entity_id),
            metadata: Set(entry.metadata.map(|m| m.to_string())),
            created_at: Set(now),
            ..Default::default()
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("写入审计日志失败: {e}")))?;

        Ok(())
    }

    /// 按实体列出审计条目；不带实体 ID 时列出该类型下的全部条目
    pub async fn list_audit_entries_impl(
        &self,
        entity_type: &str,
        entity_id: Option<i64>,
    ) -> Result<Vec<AuditLogEntry>> {
        let mut query = AuditLog::find().filter(Column::EntityType.eq(entity_type));
        if let Some(id) = entity_id {
            query = query.filter(Column::EntityId.eq(id));
        }

        let result = query
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询审计日志失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_audit_entry()).collect())
    }
}
