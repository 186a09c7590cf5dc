use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    auth::extract_claims_from_context,
    errors::AppError,
    models::{
        domain::ContentStats,
        dto::{
            request::PaginationParams,
            response::{ContentDto, MyOrganizationResponse, PaginatedResponse, UserDto},
        },
    },
};

/// Read-only mirror of the REST surface. Every field requires the claims the
/// GraphQL handler attaches to the request.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn profile(&self, ctx: &Context<'_>) -> Result<UserDto> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).map_err(client_error)?;

        state
            .user_service
            .profile(claims.user_id())
            .await
            .map_err(client_error)
    }

    async fn content(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PaginatedResponse<ContentDto>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).map_err(client_error)?;

        state
            .content_service
            .list(claims.user_id(), &PaginationParams::new(offset, limit))
            .await
            .map_err(client_error)
    }

    async fn content_stats(&self, ctx: &Context<'_>) -> Result<ContentStats> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).map_err(client_error)?;

        state
            .content_service
            .stats(claims.user_id())
            .await
            .map_err(client_error)
    }

    async fn my_organization(&self, ctx: &Context<'_>) -> Result<MyOrganizationResponse> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).map_err(client_error)?;

        state
            .organization_service
            .my_organization(claims.user_id())
            .await
            .map_err(client_error)
    }
}

/// Converts through the extension impl so clients see the same redacted
/// message and code as the REST surface.
fn client_error(err: AppError) -> async_graphql::Error {
    err.extend()
}
