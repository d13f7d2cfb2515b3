use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Deserialize;

use super::error_response;
use crate::models::assignments::requests::{CreateAssignmentRequest, PublishAssignmentRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;

#[derive(Debug, Deserialize)]
struct CreateAssignmentBody {
    teacher_id: i64,
    #[serde(flatten)]
    assignment: CreateAssignmentRequest,
}

// 创建作业
async fn create_assignment(
    service: web::Data<AssignmentService>,
    body: web::Json<CreateAssignmentBody>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    match service
        .create_assignment(body.teacher_id, body.assignment)
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "创建成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取作业详情
async fn get_assignment(
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_assignment(path.into_inner()).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "作业不存在"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 发布作业
async fn publish_assignment(
    service: web::Data<AssignmentService>,
    path: web::Path<i64>,
    body: web::Json<PublishAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .publish_assignment(path.into_inner(), body.teacher_id)
        .await
    {
        Ok(assignment) => Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "发布成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .route("", web::post().to(create_assignment))
            .route("/{id}", web::get().to(get_assignment))
            .route("/{id}/publish", web::post().to(publish_assignment)),
    );
}
