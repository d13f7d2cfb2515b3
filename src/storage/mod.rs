use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    audit::entities::{AuditLogEntry, NewAuditEntry},
    class_users::entities::{ClassUser, ClassUserRole},
    classes::entities::Class,
    grades::entities::Grade,
    submissions::entities::{Submission, SubmissionStatus},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 数据存储层接口
///
/// 所有状态迁移方法都是条件更新（以当前状态为谓词的单次原子写），
/// 返回 `bool`/计数表示谓词是否命中；并发下的冲突迁移由此解决，
/// 不使用任何应用级锁。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 班级与成员管理方法
    // 创建班级
    async fn create_class(&self, teacher_id: i64, class_name: &str) -> Result<Class>;
    // 用户加入班级
    async fn join_class(&self, class_id: i64, user_id: i64, role: ClassUserRole)
    -> Result<ClassUser>;
    // 获取用户在班级中的成员记录
    async fn get_class_user(&self, class_id: i64, user_id: i64) -> Result<Option<ClassUser>>;

    /// 作业管理方法
    // 创建作业（初始为 DRAFT）
    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过 ID 获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    // 条件发布：仅当作业仍为 DRAFT 时置为 PUBLISHED
    async fn mark_assignment_published(&self, id: i64) -> Result<bool>;
    // 列出截止时间已过的已发布计分作业 ID
    async fn list_overdue_graded_assignment_ids(&self, now: DateTime<Utc>) -> Result<Vec<i64>>;

    /// 提交管理方法
    // 创建提交草稿（班级 ID 从作业冗余）
    async fn create_submission(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission>;
    // 通过 ID 获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 通过 (作业, 学生) 获取提交，该对上至多一条
    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>>;
    // 条件刷新草稿附件：仅当提交仍为 DRAFT
    async fn refresh_draft_file(&self, submission_id: i64, file_token: &str) -> Result<bool>;
    // 条件迁移：仅当提交当前状态为 `from` 时迁移到 `to`
    async fn transition_submission(
        &self,
        submission_id: i64,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool>;
    // 批量锁定：`WHERE assignment_id IN (...) AND status = 'draft'`，返回锁定条数
    async fn lock_draft_submissions(&self, assignment_ids: &[i64]) -> Result<u64>;

    /// 评分管理方法
    // 创建评分（未发布）
    async fn create_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Grade>;
    // 通过 ID 获取评分
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    // 通过提交 ID 获取评分
    async fn get_grade_by_submission_id(&self, submission_id: i64) -> Result<Option<Grade>>;
    // 条件更新：仅当评分尚未发布
    async fn update_unpublished_grade(
        &self,
        grade_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<bool>;
    // 条件发布：仅当评分尚未发布
    async fn mark_grade_published(&self, grade_id: i64) -> Result<bool>;

    /// 审计日志方法
    // 追加审计条目
    async fn append_audit_entry(&self, entry: NewAuditEntry) -> Result<()>;
    // 按实体列出审计条目（只读报表面）；entity_id 为 None 时
    // 列出该类型下的全部条目，供无实体 ID 的汇总条目（如截止扫描）查询
    async fn list_audit_entries(
        &self,
        entity_type: &str,
        entity_id: Option<i64>,
    ) -> Result<Vec<AuditLogEntry>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
