//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 领域错误（E1xx）是面向调用方的可恢复错误，由路由层翻译为响应；
//! 基础设施错误（E0xx）表示存储或序列化故障。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_hwflow_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum HWFlowError {
            $($variant(String),)*
        }

        impl HWFlowError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(HWFlowError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(HWFlowError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(HWFlowError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl HWFlowError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        HWFlowError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_hwflow_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Serialization("E004", "Serialization Error"),
    DateParse("E005", "Date Parse Error"),
    Validation("E006", "Validation Error"),
    NotFound("E101", "Resource Not Found"),
    Forbidden("E102", "Forbidden"),
    InvalidTransition("E103", "Invalid State Transition"),
    PreconditionFailed("E104", "Precondition Failed"),
    DeadlineExceeded("E105", "Deadline Exceeded"),
    InvalidRange("E106", "Score Out Of Range"),
    Immutable("E107", "Immutable Record"),
}

impl HWFlowError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for HWFlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for HWFlowError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for HWFlowError {
    fn from(err: sea_orm::DbErr) -> Self {
        HWFlowError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for HWFlowError {
    fn from(err: std::io::Error) -> Self {
        HWFlowError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for HWFlowError {
    fn from(err: serde_json::Error) -> Self {
        HWFlowError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for HWFlowError {
    fn from(err: chrono::ParseError) -> Self {
        HWFlowError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HWFlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(HWFlowError::database_config("test").code(), "E001");
        assert_eq!(HWFlowError::not_found("test").code(), "E101");
        assert_eq!(HWFlowError::invalid_transition("test").code(), "E103");
        assert_eq!(HWFlowError::immutable("test").code(), "E107");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            HWFlowError::deadline_exceeded("test").error_type(),
            "Deadline Exceeded"
        );
        assert_eq!(
            HWFlowError::precondition_failed("test").error_type(),
            "Precondition Failed"
        );
    }

    #[test]
    fn test_error_message() {
        let err = HWFlowError::invalid_range("score 120 > max 100");
        assert_eq!(err.message(), "score 120 > max 100");
    }

    #[test]
    fn test_format_simple() {
        let err = HWFlowError::forbidden("非作业所属教师");
        let formatted = err.format_simple();
        assert!(formatted.contains("Forbidden"));
        assert!(formatted.contains("非作业所属教师"));
    }
}
