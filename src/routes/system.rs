use std::sync::Arc;

use actix_web::{HttpResponse, Result as ActixResult, web};

use super::error_response;
use crate::models::ApiResponse;
use crate::models::assignments::responses::SweepResponse;
use crate::services::DeadlineService;
use crate::storage::Storage;

// 手动触发一次截止扫描（外部调度器的调用入口）
// POST /system/sweep
async fn run_sweep(service: web::Data<DeadlineService>) -> ActixResult<HttpResponse> {
    match service.run_sweep().await {
        Ok(locked) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(SweepResponse { locked }, "扫描完成"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 按实体列出审计条目（只读报表面）
// GET /system/audit/{entity_type}/{entity_id}
async fn list_audit_entries(
    storage: web::Data<Arc<dyn Storage>>,
    path: web::Path<(String, i64)>,
) -> ActixResult<HttpResponse> {
    let (entity_type, entity_id) = path.into_inner();
    match storage
        .list_audit_entries(&entity_type, Some(entity_id))
        .await
    {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

// 按类型列出审计条目（截止扫描等汇总条目没有实体 ID，只能按类型取）
// GET /system/audit/{entity_type}
async fn list_audit_entries_by_type(
    storage: web::Data<Arc<dyn Storage>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let entity_type = path.into_inner();
    match storage.list_audit_entries(&entity_type, None).await {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "查询成功"))),
        Err(e) => Ok(error_response(&e)),
    }
}

pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/system")
            .route("/sweep", web::post().to(run_sweep))
            .route(
                "/audit/{entity_type}",
                web::get().to(list_audit_entries_by_type),
            )
            .route(
                "/audit/{entity_type}/{entity_id}",
                web::get().to(list_audit_entries),
            ),
    );
}
