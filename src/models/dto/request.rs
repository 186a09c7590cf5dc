use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{
    generation::DEFAULT_LANGUAGE, ContentType, GenerationRequest, LearningContext, ProviderKind,
};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(rename = "type", alias = "contentType", default)]
    pub content_type: String,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 500))]
    pub topic: String,

    #[validate(length(min = 1, max = 100))]
    pub difficulty: String,

    #[validate(length(max = 100))]
    pub language: Option<String>,

    pub country: Option<String>,
    pub state: Option<String>,
    pub school_type: Option<String>,
    pub grade: Option<String>,

    #[validate(length(max = 10000))]
    pub custom_prompt: Option<String>,

    pub provider: Option<String>,
}

impl TryFrom<GenerateContentRequest> for GenerationRequest {
    type Error = AppError;

    /// The content type is checked first so an unknown type is reported as
    /// such even when other fields are also wrong.
    fn try_from(request: GenerateContentRequest) -> AppResult<Self> {
        let content_type: ContentType = request.content_type.parse()?;
        request.validate()?;
        require_non_blank("subject", &request.subject)?;
        require_non_blank("topic", &request.topic)?;
        require_non_blank("difficulty", &request.difficulty)?;

        Ok(GenerationRequest {
            content_type,
            subject: request.subject.trim().to_string(),
            topic: request.topic.trim().to_string(),
            difficulty: request.difficulty.trim().to_string(),
            language: non_blank(request.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            context: LearningContext {
                country: non_blank(request.country),
                state: non_blank(request.state),
                school_type: non_blank(request.school_type),
                grade: non_blank(request.grade),
            },
            custom_prompt: request.custom_prompt.filter(|p| !p.trim().is_empty()),
            provider: ProviderKind::select(request.provider.as_deref()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveContentRequest {
    #[validate(length(min = 1, max = 300))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 500))]
    pub topic: String,

    #[validate(length(min = 1, max = 100))]
    pub difficulty: String,

    #[serde(rename = "type", alias = "contentType")]
    pub content_type: String,

    pub language: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub school_type: Option<String>,
    pub grade: Option<String>,
    pub based_on_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaxonomyEntryRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JoinOrganizationRequest {
    #[validate(length(min = 1, message = "Organization ID is required"))]
    pub organization_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(DEFAULT_PAGE_SIZE),
        }
    }
}

impl PaginationParams {
    pub fn new(offset: Option<i64>, limit: Option<i64>) -> Self {
        Self { offset, limit }
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

pub fn require_non_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field)));
    }
    Ok(())
}

pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
