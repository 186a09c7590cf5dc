use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

/// Pulls the token out of an `Authorization` header value. A missing header
/// and a malformed one are reported differently.
pub fn bearer_token(header: Option<&str>) -> AppResult<&str> {
    let header =
        header.ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
