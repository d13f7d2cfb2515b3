use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::submissions::requests::{SubmitRequest, UpsertDraftRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;

// 创建或更新提交草稿
// PUT /submissions/draft
async fn upsert_draft(
    service: web::Data<SubmissionService>,
    body: web::Json<UpsertDraftRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    match service
        .upsert_draft(body.student_id, body.assignment_id, &body.file_token)
        .await
    {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "保存成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 定稿提交
// POST /submissions/{id}/submit
async fn submit(
    service: web::Data<SubmissionService>,
    path: web::Path<i64>,
    body: web::Json<SubmitRequest>,
) -> ActixResult<HttpResponse> {
    match service.submit(path.into_inner(), body.student_id).await {
        Ok(submission) => Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取提交详情（附带评分）
// GET /submissions/{id}
async fn get_submission(
    service: web::Data<SubmissionService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_submission(path.into_inner()).await {
        Ok(Some(submission)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "提交不存在"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .route("/draft", web::put().to(upsert_draft))
            .route("/{id}", web::get().to(get_submission))
            .route("/{id}/submit", web::post().to(submit)),
    );
}
