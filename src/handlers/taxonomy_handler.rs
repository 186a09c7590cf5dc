use actix_web::{delete, get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::{
        domain::TaxonomyKind,
        dto::{
            request::{CreateTaxonomyEntryRequest, PaginationParams},
            response::MessageResponse,
        },
    },
};

fn taxonomy_kind(segment: &str) -> AppResult<TaxonomyKind> {
    TaxonomyKind::from_route_segment(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown list '{}'", segment)))
}

#[get("/{kind:subjects|states|school-types|grades}")]
async fn list_entries(
    state: web::Data<AppState>,
    kind: web::Path<String>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let kind = taxonomy_kind(&kind)?;
    let response = state
        .taxonomy_service
        .list(kind, auth.user_id(), &query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/{kind:subjects|states|school-types|grades}")]
async fn create_entry(
    state: web::Data<AppState>,
    kind: web::Path<String>,
    request: web::Json<CreateTaxonomyEntryRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let kind = taxonomy_kind(&kind)?;
    let entry = state
        .taxonomy_service
        .create(kind, auth.user_id(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

#[delete("/subjects/{id}")]
async fn delete_subject(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .taxonomy_service
        .delete(TaxonomyKind::Subject, auth.user_id(), &id)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Subject deleted successfully")))
}
