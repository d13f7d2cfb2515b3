use serde::{Deserialize, Serialize};

use crate::errors::HWFlowError;

// 统一的业务错误码，随 ApiResponse 返回给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    Validation = 40001,
    Forbidden = 40301,
    NotFound = 40401,
    InvalidTransition = 40901,
    Immutable = 40902,
    PreconditionFailed = 41201,
    DeadlineExceeded = 41202,
    InvalidRange = 42201,
    InternalServerError = 50000,
}

impl From<&HWFlowError> for ErrorCode {
    fn from(err: &HWFlowError) -> Self {
        match err {
            HWFlowError::NotFound(_) => ErrorCode::NotFound,
            HWFlowError::Forbidden(_) => ErrorCode::Forbidden,
            HWFlowError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            HWFlowError::PreconditionFailed(_) => ErrorCode::PreconditionFailed,
            HWFlowError::DeadlineExceeded(_) => ErrorCode::DeadlineExceeded,
            HWFlowError::InvalidRange(_) => ErrorCode::InvalidRange,
            HWFlowError::Immutable(_) => ErrorCode::Immutable,
            HWFlowError::Validation(_) => ErrorCode::Validation,
            _ => ErrorCode::InternalServerError,
        }
    }
}
