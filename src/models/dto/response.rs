use async_graphql::{OutputType, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    ContentArtifact, ContentType, MemberRole, Organization, TaxonomyEntry, User,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub role: MemberRole,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            role: user.role(),
            organization_id: user.organization_id().map(str::to_string),
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.image,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub based_on_id: Option<String>,
    pub user_id: String,
    pub creator_name: String,
    pub creator_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<ContentArtifact> for ContentDto {
    fn from(artifact: ContentArtifact) -> Self {
        ContentDto {
            id: artifact.id,
            title: artifact.title,
            content: artifact.body,
            subject: artifact.subject,
            topic: artifact.topic,
            difficulty: artifact.difficulty,
            content_type: artifact.content_type,
            language: artifact.language,
            country: artifact.country,
            state: artifact.state,
            school_type: artifact.school_type,
            grade: artifact.grade,
            based_on_id: artifact.based_on_id,
            user_id: artifact.owner_user_id,
            creator_name: artifact.creator_name,
            creator_email: artifact.creator_email,
            created_at: artifact.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveContentResponse {
    pub message: String,
    pub content: ContentDto,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyEntryDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<TaxonomyEntry> for TaxonomyEntryDto {
    fn from(entry: TaxonomyEntry) -> Self {
        TaxonomyEntryDto {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDto {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_by_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Organization> for OrganizationDto {
    fn from(organization: Organization) -> Self {
        OrganizationDto {
            id: organization.id,
            name: organization.name,
            description: organization.description,
            created_by_user_id: organization.created_by_user_id,
            created_at: organization.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub message: String,
    pub organization: OrganizationDto,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for MemberDto {
    fn from(user: User) -> Self {
        MemberDto {
            role: user.role(),
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct MyOrganizationResponse {
    pub organization: Option<OrganizationDto>,
    pub members: Vec<MemberDto>,
    pub user_role: MemberRole,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[graphql(concrete(name = "ContentPage", params(ContentDto)))]
#[graphql(concrete(name = "TaxonomyPage", params(TaxonomyEntryDto)))]
pub struct PaginatedResponse<T: OutputType> {
    pub items: Vec<T>,
    pub pagination: PaginationMetadata,
}

impl<T: OutputType> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, offset: i64, limit: i64, total: i64) -> Self {
        PaginatedResponse {
            items,
            pagination: PaginationMetadata {
                offset,
                limit,
                total,
            },
        }
    }
}
