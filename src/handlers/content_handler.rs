use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PaginationParams, SaveContentRequest},
        response::SaveContentResponse,
    },
};

#[post("/content")]
async fn save_content(
    state: web::Data<AppState>,
    request: web::Json<SaveContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let content = state
        .content_service
        .save(auth.user_id(), request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(SaveContentResponse {
        message: "Content saved successfully".to_string(),
        content,
    }))
}

#[get("/content")]
async fn list_content(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .content_service
        .list(auth.user_id(), &query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/content/stats")]
async fn content_stats(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let stats = state.content_service.stats(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

#[get("/content/{id}")]
async fn get_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let content = state.content_service.get(auth.user_id(), &id).await?;
    Ok(HttpResponse::Ok().json(content))
}
