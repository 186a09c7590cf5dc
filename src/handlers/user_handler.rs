use actix_web::{get, web, HttpResponse};
use chrono::Utc;

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/user/profile")]
async fn get_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.user_service.profile(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/db")]
async fn health_check_db(state: web::Data<AppState>) -> HttpResponse {
    match state.health.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "OK",
            "database": "connected"
        })),
        Err(e) => {
            log::error!("Database health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "ERROR",
                "database": "disconnected"
            }))
        }
    }
}
