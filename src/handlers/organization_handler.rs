use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{CreateOrganizationRequest, JoinOrganizationRequest},
        response::{MessageResponse, OrganizationResponse},
    },
};

#[post("/organizations")]
async fn create_organization(
    state: web::Data<AppState>,
    request: web::Json<CreateOrganizationRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let organization = state
        .organization_service
        .create(auth.user_id(), request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(OrganizationResponse {
        message: "Organization created successfully".to_string(),
        organization,
    }))
}

#[get("/organizations/my")]
async fn my_organization(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = state
        .organization_service
        .my_organization(auth.user_id())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/organizations/join")]
async fn join_organization(
    state: web::Data<AppState>,
    request: web::Json<JoinOrganizationRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let organization = state
        .organization_service
        .join(auth.user_id(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(OrganizationResponse {
        message: "Successfully joined organization".to_string(),
        organization,
    }))
}

#[post("/organizations/leave")]
async fn leave_organization(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.organization_service.leave(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Successfully left organization")))
}

#[delete("/organizations/members/{user_id}")]
async fn remove_member(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .organization_service
        .remove_member(auth.user_id(), &user_id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Member removed successfully")))
}
