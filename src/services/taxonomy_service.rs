use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{TaxonomyEntry, TaxonomyKind},
        dto::{
            request::{non_blank, require_non_blank, CreateTaxonomyEntryRequest, PaginationParams},
            response::{PaginatedResponse, TaxonomyEntryDto},
        },
    },
    repositories::TaxonomyRepository,
};

pub struct TaxonomyService {
    repository: Arc<dyn TaxonomyRepository>,
}

impl TaxonomyService {
    pub fn new(repository: Arc<dyn TaxonomyRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        kind: TaxonomyKind,
        user_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<PaginatedResponse<TaxonomyEntryDto>> {
        let offset = pagination.offset();
        let limit = pagination.limit();

        let (items, total) = self
            .repository
            .list_by_owner(kind, user_id, offset, limit)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(TaxonomyEntryDto::from).collect(),
            offset,
            limit,
            total,
        ))
    }

    /// Names are unique per owner within a kind. The lookup gives a clean
    /// error for the common case; the unique index catches concurrent inserts.
    pub async fn create(
        &self,
        kind: TaxonomyKind,
        user_id: &str,
        request: CreateTaxonomyEntryRequest,
    ) -> AppResult<TaxonomyEntryDto> {
        request.validate()?;
        require_non_blank("name", &request.name)?;

        let name = request.name.trim();
        if self
            .repository
            .find_by_name(kind, user_id, name)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "{} '{}' already exists",
                kind, name
            )));
        }

        let description = if kind.supports_description() {
            non_blank(request.description)
        } else {
            None
        };

        let entry = TaxonomyEntry::new(name, description.as_deref(), user_id);
        let created = self.repository.create(kind, entry).await?;

        log::info!("Created {} {} for user {}", kind, created.id, user_id);
        Ok(created.into())
    }

    pub async fn delete(&self, kind: TaxonomyKind, user_id: &str, id: &str) -> AppResult<()> {
        if !self.repository.delete_owned(kind, user_id, id).await? {
            return Err(AppError::NotFound(format!(
                "{} with id '{}' not found",
                kind, id
            )));
        }

        log::info!("Deleted {} {} for user {}", kind, id, user_id);
        Ok(())
    }
}
