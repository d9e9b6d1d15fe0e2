/// Health endpoints, served without authentication
use crate::db::DynStore;
use actix_web::{web, HttpResponse};

const SERVICE_NAME: &str = "social-post-service";

pub async fn health_summary(store: web::Data<DynStore>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            }))
        }
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
