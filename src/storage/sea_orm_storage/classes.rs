//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::ActiveModel;
use crate::errors::{HWFlowError, Result};
use crate::models::classes::entities::Class;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, Set};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, teacher_id: i64, class_name: &str) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            class_name: Set(class_name.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(Class {
            id: result.id,
            teacher_id: result.teacher_id,
            class_name: result.class_name,
            created_at: DateTime::<Utc>::from_timestamp(result.created_at, 0).unwrap_or_default(),
        })
    }
}
