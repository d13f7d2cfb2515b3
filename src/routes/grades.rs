use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::grades::requests::{PublishGradeRequest, SaveGradeRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::GradeService;

// 保存评分（创建或更新未发布的评分）
// PUT /grades/submissions/{submission_id}
async fn save_grade(
    service: web::Data<GradeService>,
    path: web::Path<i64>,
    body: web::Json<SaveGradeRequest>,
) -> ActixResult<HttpResponse> {
    let body = body.into_inner();
    match service
        .save_grade(
            path.into_inner(),
            body.teacher_id,
            body.score,
            body.feedback,
        )
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "保存成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 发布评分
// POST /grades/{id}/publish
async fn publish_grade(
    service: web::Data<GradeService>,
    path: web::Path<i64>,
    body: web::Json<PublishGradeRequest>,
) -> ActixResult<HttpResponse> {
    match service
        .publish_grade(path.into_inner(), body.teacher_id)
        .await
    {
        Ok(grade) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "发布成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 获取评分详情
// GET /grades/{id}
async fn get_grade(
    service: web::Data<GradeService>,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    match service.get_grade(path.into_inner()).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::NotFound, "评分不存在"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn configure_grades_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .route(
                "/submissions/{submission_id}",
                web::put().to(save_grade),
            )
            .route("/{id}", web::get().to(get_grade))
            .route("/{id}/publish", web::post().to(publish_grade)),
    );
}
