use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

/// A user's single organization membership. The role only exists alongside
/// an organization id, so clearing the membership clears both at once.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Membership {
    pub organization_id: String,
    pub role: MemberRole,
}

impl Membership {
    pub fn admin(organization_id: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            role: MemberRole::Admin,
        }
    }

    pub fn member(organization_id: &str) -> Self {
        Self {
            organization_id: organization_id.to_string(),
            role: MemberRole::Member,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership: Option<Membership>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: &str, email: &str, password_hash: &str) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            image: None,
            membership: None,
            created_at: Some(Utc::now()),
        }
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.membership
            .as_ref()
            .map(|membership| membership.organization_id.as_str())
    }

    /// Users outside an organization are plain members.
    pub fn role(&self) -> MemberRole {
        self.membership
            .as_ref()
            .map(|membership| membership.role)
            .unwrap_or_default()
    }

    pub fn is_admin_of(&self, organization_id: &str) -> bool {
        matches!(
            &self.membership,
            Some(Membership { organization_id: org, role: MemberRole::Admin }) if org == organization_id
        )
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(name: &str) -> Self {
        User::new(
            name,
            &format!("{}@example.com", name.to_lowercase()),
            "$argon2id$test-hash",
        )
    }
}
