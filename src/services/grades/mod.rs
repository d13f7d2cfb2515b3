pub mod publish;
pub mod save;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::grades::entities::Grade;
use crate::services::AuditRecorder;
use crate::storage::Storage;

/// 评分工作流服务
pub struct GradeService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) audit: AuditRecorder,
}

impl GradeService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let audit = AuditRecorder::new(storage.clone());
        Self { storage, audit }
    }

    /// 保存评分：首次创建，后续在未发布时原地更新
    pub async fn save_grade(
        &self,
        submission_id: i64,
        teacher_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Grade> {
        save::save_grade(self, submission_id, teacher_id, score, feedback).await
    }

    /// 发布评分：单向终态迁移
    pub async fn publish_grade(&self, grade_id: i64, teacher_id: i64) -> Result<Grade> {
        publish::publish_grade(self, grade_id, teacher_id).await
    }

    /// 获取评分详情
    pub async fn get_grade(&self, grade_id: i64) -> Result<Option<Grade>> {
        self.storage.get_grade_by_id(grade_id).await
    }
}
