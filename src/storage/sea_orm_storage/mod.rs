//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod audit;
mod class_users;
mod classes;
mod grades;
mod submissions;

use crate::config::AppConfig;
use crate::errors::{HWFlowError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例（从全局配置）
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::new_with_url(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 从指定 URL 创建存储实例（测试使用 `:memory:` + pool_size 1）
    pub async fn new_with_url(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| HWFlowError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        // 内存库只能使用单连接，否则每个连接各是一个空库
        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| HWFlowError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { pool_size })
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .connect_with(opt)
            .await
            .map_err(|e| HWFlowError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| HWFlowError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(HWFlowError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use chrono::{DateTime, Utc};

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    audit::entities::{AuditLogEntry, NewAuditEntry},
    class_users::entities::{ClassUser, ClassUserRole},
    classes::entities::Class,
    grades::entities::Grade,
    submissions::entities::{Submission, SubmissionStatus},
};
use crate::storage::Storage;

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    async fn create_class(&self, teacher_id: i64, class_name: &str) -> Result<Class> {
        self.create_class_impl(teacher_id, class_name).await
    }

    async fn join_class(
        &self,
        class_id: i64,
        user_id: i64,
        role: ClassUserRole,
    ) -> Result<ClassUser> {
        self.join_class_impl(class_id, user_id, role).await
    }

    async fn get_class_user(&self, class_id: i64, user_id: i64) -> Result<Option<ClassUser>> {
        self.get_class_user_impl(class_id, user_id).await
    }

    async fn create_assignment(
        &self,
        teacher_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(teacher_id, req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn mark_assignment_published(&self, id: i64) -> Result<bool> {
        self.mark_assignment_published_impl(id).await
    }

    async fn list_overdue_graded_assignment_ids(&self, now: DateTime<Utc>) -> Result<Vec<i64>> {
        self.list_overdue_graded_assignment_ids_impl(now).await
    }

    async fn create_submission(
        &self,
        assignment_id: i64,
        class_id: i64,
        student_id: i64,
        file_token: &str,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, class_id, student_id, file_token)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_submission_by_assignment_and_student(
        &self,
        assignment_id: i64,
        student_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_student_impl(assignment_id, student_id)
            .await
    }

    async fn refresh_draft_file(&self, submission_id: i64, file_token: &str) -> Result<bool> {
        self.refresh_draft_file_impl(submission_id, file_token)
            .await
    }

    async fn transition_submission(
        &self,
        submission_id: i64,
        from: SubmissionStatus,
        to: SubmissionStatus,
    ) -> Result<bool> {
        self.transition_submission_impl(submission_id, from, to)
            .await
    }

    async fn lock_draft_submissions(&self, assignment_ids: &[i64]) -> Result<u64> {
        self.lock_draft_submissions_impl(assignment_ids).await
    }

    async fn create_grade(
        &self,
        submission_id: i64,
        grader_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Grade> {
        self.create_grade_impl(submission_id, grader_id, score, feedback)
            .await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn get_grade_by_submission_id(&self, submission_id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_submission_id_impl(submission_id).await
    }

    async fn update_unpublished_grade(
        &self,
        grade_id: i64,
        score: f64,
        feedback: Option<String>,
    ) -> Result<bool> {
        self.update_unpublished_grade_impl(grade_id, score, feedback)
            .await
    }

    async fn mark_grade_published(&self, grade_id: i64) -> Result<bool> {
        self.mark_grade_published_impl(grade_id).await
    }

    async fn append_audit_entry(&self, entry: NewAuditEntry) -> Result<()> {
        self.append_audit_entry_impl(entry).await
    }

    async fn list_audit_entries(
        &self,
        entity_type: &str,
        entity_id: Option<i64>,
    ) -> Result<Vec<AuditLogEntry>> {
        self.list_audit_entries_impl(entity_type, entity_id).await
    }
}
