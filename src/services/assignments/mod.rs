pub mod create;
pub mod publish;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use crate::services::AuditRecorder;
use crate::storage::Storage;

/// 作业状态机服务
pub struct AssignmentService {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) audit: AuditRecorder,
}

impl AssignmentService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let audit = AuditRecorder::new(storage.clone());
        Self { storage, audit }
    }

    /// 创建作业（初始为 DRAFT）
    pub async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        create::create_assignment(self, teacher_id, req).await
    }

    /// 发布作业：DRAFT → PUBLISHED，单向且不幂等
    pub async fn publish_assignment(
        &self,
        assignment_id: i64,
        teacher_id: i64,
    ) -> Result<Assignment> {
        publish::publish_assignment(self, assignment_id, teacher_id).await
    }

    /// 获取作业详情
    pub async fn get_assignment(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.storage.get_assignment_by_id(assignment_id).await
    }
}
