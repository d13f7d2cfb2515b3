//! 评分存储操作

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::errors::{HWFlowError, Result};
use crate::models::grades::entities::Grade;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建评分（未发布）
    ///
    /// submission_id 上的唯一约束保证每个提交至多一条评分；
    /// 并发的首次评分由唯一约束兜底。
    pub async fn create_grade_impl(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            submission_id: Set(submission_id),
            grader_id: Set(grader_id),
            score: Set(score),
            feedback: Set(feedback),
            published: Set(false),
            graded_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("创建评分失败: {e}")))?;

        Ok(result.into_grade())
    }

    /// 通过 ID 获取评分
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 通过提交 ID 获取评分
    pub async fn get_grade_by_submission_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Grade>> {
        let result = Grades::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询评分失败: {e}")))?;

        Ok(result.map(|m| m.into_grade()))
    }

    /// 条件更新评分：仅当尚未发布
    pub async fn update_unpublished_grade_impl(
        &self,
        grade_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Grades::update_many()
            .col_expr(Column::Score, Expr::value(score))
            .col_expr(Column::Feedback, Expr::value(feedback))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(grade_id))
            .filter(Column::Published.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("更新评分失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// 条件发布：`UPDATE grades SET published=true WHERE id=? AND published=false`
    pub async fn mark_grade_published_impl(&self, grade_id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Grades::update_many()
            .col_expr(Column::Published, Expr::value(true))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(grade_id))
            .filter(Column::Published.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("发布评分失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }
}
