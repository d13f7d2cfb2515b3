pub mod assignments;
pub mod grades;
pub mod submissions;
pub mod system;

pub use assignments::configure_assignments_routes;
pub use grades::configure_grades_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;

use actix_web::HttpResponse;

use crate::errors::HWFlowError;
use crate::models::{ApiResponse, ErrorCode};

/// 将领域错误翻译为统一响应
///
/// 服务层的错误分类是面向调用方的契约，这里只做 HTTP 映射，
/// 不吞掉任何一类。
pub(crate) fn error_response(err: &HWFlowError) -> HttpResponse {
    let code = ErrorCode::from(err);
    let body = ApiResponse::error_empty(code, err.message());

    match err {
        HWFlowError::NotFound(_) => HttpResponse::NotFound().json(body),
        HWFlowError::Forbidden(_) => HttpResponse::Forbidden().json(body),
        HWFlowError::InvalidTransition(_) | HWFlowError::Immutable(_) => {
            HttpResponse::Conflict().json(body)
        }
        HWFlowError::PreconditionFailed(_) => HttpResponse::PreconditionFailed().json(body),
        HWFlowError::DeadlineExceeded(_) | HWFlowError::InvalidRange(_) => {
            HttpResponse::UnprocessableEntity().json(body)
        }
        HWFlowError::Validation(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            "内部错误",
        )),
    }
}
