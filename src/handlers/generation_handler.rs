use actix_web::{post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState, auth::AuthenticatedUser, errors::AppError, middleware::get_request_id,
    models::dto::request::GenerateContentRequest,
};

#[post("/generate-content")]
async fn generate_content(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(&req);
    log::debug!("[{}] Generation requested by user {}", request_id, auth.user_id());

    let generated = state
        .generation_service
        .generate(request.into_inner(), &request_id)
        .await?;
    Ok(HttpResponse::Ok().json(generated))
}
