//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{HWFlowError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentKind, AssignmentStatus},
    requests::CreateAssignmentRequest,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};

impl SeaOrmStorage {
    /// 创建作业（初始为 DRAFT）
    pub async fn create_assignment_impl(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            created_by: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            kind: Set(req.kind.to_string()),
            status: Set(AssignmentStatus::Draft.to_string()),
            max_score: Set(req.max_score),
            due_at: Set(req.due_at.map(|due| due.timestamp())),
            file_token: Set(req.file_token),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 条件发布：`UPDATE assignments SET status='published' WHERE id=? AND status='draft'`
    ///
    /// 返回 false 表示谓词未命中（作业不存在或已不是 DRAFT）。
    pub async fn mark_assignment_published_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Assignments::update_many()
            .col_expr(
                Column::Status,
                Expr::value(AssignmentStatus::Published.to_string()),
            )
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(AssignmentStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("发布作业失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// 列出截止时间已过的已发布计分作业 ID
    ///
    /// 只有 PUBLISHED + GRADED + 有截止时间的作业参与截止日期执行。
    pub async fn list_overdue_graded_assignment_ids_impl(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<i64>> {
        let ids = Assignments::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::Status.eq(AssignmentStatus::Published.to_string()))
            .filter(Column::Kind.eq(AssignmentKind::Graded.to_string()))
            .filter(Column::DueAt.is_not_null())
            .filter(Column::DueAt.lt(now.timestamp()))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询过期作业失败: {e}")))?;

        Ok(ids)
    }
}
