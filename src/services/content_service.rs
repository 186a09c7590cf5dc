use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{generation::DEFAULT_LANGUAGE, ContentArtifact, ContentStats, ContentType, User},
        dto::{
            request::{non_blank, require_non_blank, PaginationParams, SaveContentRequest},
            response::{ContentDto, PaginatedResponse},
        },
    },
    repositories::{ContentRepository, UserRepository},
    services::access_policy::{resolve_scope, AccessScope},
};

pub struct ContentService {
    contents: Arc<dyn ContentRepository>,
    users: Arc<dyn UserRepository>,
}

impl ContentService {
    pub fn new(contents: Arc<dyn ContentRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { contents, users }
    }

    /// Persists an artifact stamped with the acting user.
    pub async fn save(&self, user_id: &str, request: SaveContentRequest) -> AppResult<ContentDto> {
        let content_type: ContentType = request.content_type.parse()?;
        request.validate()?;
        for (field, value) in [
            ("title", &request.title),
            ("content", &request.content),
            ("subject", &request.subject),
            ("topic", &request.topic),
            ("difficulty", &request.difficulty),
        ] {
            require_non_blank(field, value)?;
        }

        let owner = self.viewer(user_id).await?;

        let language = non_blank(request.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let mut artifact = ContentArtifact::new(
            request.title.trim(),
            &request.content,
            request.subject.trim(),
            request.topic.trim(),
            request.difficulty.trim(),
            content_type,
            &language,
        );
        artifact.country = non_blank(request.country);
        artifact.state = non_blank(request.state);
        artifact.school_type = non_blank(request.school_type);
        artifact.grade = non_blank(request.grade);
        artifact.based_on_id = non_blank(request.based_on_id);
        artifact.owner_user_id = owner.id;
        artifact.creator_name = owner.name;
        artifact.creator_email = owner.email;

        let saved = self.contents.create(artifact).await?;
        log::info!("Saved {} {} for user {}", saved.content_type, saved.id, user_id);

        Ok(saved.into())
    }

    pub async fn list(
        &self,
        user_id: &str,
        pagination: &PaginationParams,
    ) -> AppResult<PaginatedResponse<ContentDto>> {
        let scope = self.scope(user_id).await?;
        let offset = pagination.offset();
        let limit = pagination.limit();

        let (items, total) = self
            .contents
            .find_by_owners(&scope.owner_ids(), offset, limit)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(ContentDto::from).collect(),
            offset,
            limit,
            total,
        ))
    }

    /// Artifacts outside the viewer's scope are reported as missing.
    pub async fn get(&self, user_id: &str, content_id: &str) -> AppResult<ContentDto> {
        let scope = self.scope(user_id).await?;

        self.contents
            .find_by_id(content_id)
            .await?
            .filter(|artifact| scope.can_view(artifact))
            .map(ContentDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Content with id '{}' not found", content_id)))
    }

    pub async fn stats(&self, user_id: &str) -> AppResult<ContentStats> {
        let scope = self.scope(user_id).await?;
        self.contents.stats_for_owners(&scope.owner_ids()).await
    }

    async fn scope(&self, user_id: &str) -> AppResult<AccessScope> {
        let viewer = self.viewer(user_id).await?;
        resolve_scope(self.users.as_ref(), &viewer).await
    }

    async fn viewer(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }
}
