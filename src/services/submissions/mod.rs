pub mod draft;
pub mod submit;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::submissions::{entities::Submission, responses::SubmissionResponse};
use crate::services::AuditRecorder;
use crate::storage::Storage;

/// 提交状态机服务
pub struct SubmissionService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) audit: AuditRecorder,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let audit = AuditRecorder::new(storage.clone());
        Self { storage, audit }
    }

    /// 创建或更新提交草稿（学生在定稿前唯一的可变路径）
    pub async fn upsert_draft(
        &self,
        student_id: i64,
        assignment_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        draft::upsert_draft(self, student_id, assignment_id, file_token).await
    }

    /// 定稿提交：DRAFT → SUBMITTED，迟交则 DRAFT → LOCKED 并报错
    pub async fn submit(&self, submission_id: i64, student_id: i64) -> Result<Submission> {
        submit::submit(self, submission_id, student_id).await
    }

    /// 获取提交详情（附带评分）
    pub async fn get_submission(&self, submission_id: i64) -> Result<Option<SubmissionResponse>> {
        let Some(submission) = self.storage.get_submission_by_id(submission_id).await? else {
            return Ok(None);
        };
        let grade = self.storage.get_grade_by_submission_id(submission_id).await?;
        Ok(Some(SubmissionResponse { submission, grade }))
    }
}
