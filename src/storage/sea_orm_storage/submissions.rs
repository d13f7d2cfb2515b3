//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{HWFlowError, Result};
use crate::models::submissions::entities::{Submission, SubmissionStatus};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建提交草稿
    ///
    /// (assignment_id, student_id) 上的唯一索引保证每对至多一条；
    /// 并发的首次创建由唯一约束兜底，冲突以数据库错误上抛。
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            class_id: Set(class_id),
            student_id: Set(student_id),
            status: Set(SubmissionStatus::Draft.to_string()),
            file_token: Set(file_token.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            submitted_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 通过 (作业, 学生) 获取提交
    pub async fn get_submission_by_assignment_and_student_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 条件刷新草稿附件：仅当提交仍为 DRAFT
    pub async fn refresh_draft_file_impl(
        &self,
        submission_id: i64,
        file_token: &str,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(Column::FileToken, Expr::value(file_token))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(SubmissionStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("更新提交草稿失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// 条件迁移：`UPDATE submissions SET status=? WHERE id=? AND status=?`
    ///
    /// 单次原子写即是全部并发控制：两个冲突迁移至多一个命中谓词。
    pub async fn transition_submission_impl(
        &self,
        submission_id: i64,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let mut update = Submissions::update_many()
            .col_expr(Column::Status, Expr::value(to.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now));

        // 定稿时间只在进入 SUBMITTED 时落下
        if to == SubmissionStatus::Submitted {
            update = update.col_expr(Column::SubmittedAt, Expr::value(now));
        }

        let result = update
            .filter(Column::Id.eq(submission_id))
            .filter(Column::Status.eq(from.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("迁移提交状态失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// 批量锁定草稿提交
    ///
    /// `WHERE assignment_id IN (...) AND status = 'draft'`，天然幂等：
    /// 重复执行只会命中仍为 DRAFT 的行。
    pub async fn lock_draft_submissions_impl(&self, assignment_ids: &[i64]) -> Result<u64> {
        if assignment_ids.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(Column::Status, Expr::value(SubmissionStatus::Locked.to_string()))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::AssignmentId.is_in(assignment_ids.iter().copied()))
            .filter(Column::Status.eq(SubmissionStatus::Draft.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("批量锁定提交失败: {e}")))?;

        Ok(result.rows_affected)
    }
}
