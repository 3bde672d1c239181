use actix_web::{http::StatusCode, web, HttpResponse};
use crate::core::catalog;
use crate::routes::error_response;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/plans", web::get().to(list_plans))
        .route("/plans/{id}", web::get().to(get_plan));
}

/// GET /api/v1/plans
async fn list_plans() -> HttpResponse {
    HttpResponse::Ok().json(catalog::plans())
}

/// GET /api/v1/plans/{id}
async fn get_plan(path: web::Path<u32>) -> HttpResponse {
    let id = path.into_inner();
    match catalog::find(id) {
        Some(plan) => HttpResponse::Ok().json(plan),
        None => error_response(StatusCode::NOT_FOUND, "Plan not found", format!("No plan with id {}", id)),
    }
}
