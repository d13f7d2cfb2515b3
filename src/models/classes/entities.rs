use serde::{Deserialize, Serialize};

/// 班级
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub teacher_id: i64,
    pub class_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
