use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{MemberRole, Membership, Organization, User},
        dto::{
            request::{non_blank, require_non_blank, CreateOrganizationRequest, JoinOrganizationRequest},
            response::{MemberDto, MyOrganizationResponse, OrganizationDto},
        },
    },
    repositories::{OrganizationRepository, UserRepository},
};

/// Membership changes always go through [`UserRepository::set_membership`],
/// which writes organization and role together.
pub struct OrganizationService {
    organizations: Arc<dyn OrganizationRepository>,
    users: Arc<dyn UserRepository>,
}

impl OrganizationService {
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            organizations,
            users,
        }
    }

    /// The creator becomes the organization's first admin.
    pub async fn create(
        &self,
        user_id: &str,
        request: CreateOrganizationRequest,
    ) -> AppResult<OrganizationDto> {
        request.validate()?;
        require_non_blank("Organization name", &request.name)?;

        let creator = self.user(user_id).await?;
        let description = non_blank(request.description);
        let organization = self
            .organizations
            .create(Organization::new(
                request.name.trim(),
                description.as_deref(),
                &creator.id,
            ))
            .await?;

        self.users
            .set_membership(&creator.id, Some(Membership::admin(&organization.id)))
            .await?;

        log::info!("User {} created organization {}", creator.id, organization.id);
        Ok(organization.into())
    }

    pub async fn my_organization(&self, user_id: &str) -> AppResult<MyOrganizationResponse> {
        let user = self.user(user_id).await?;

        let Some(organization_id) = user.organization_id() else {
            return Ok(MyOrganizationResponse {
                organization: None,
                members: Vec::new(),
                user_role: MemberRole::Member,
            });
        };

        let organization = self.organizations.find_by_id(organization_id).await?;
        let members = self.users.find_by_organization(organization_id).await?;

        Ok(MyOrganizationResponse {
            organization: organization.map(OrganizationDto::from),
            members: members.into_iter().map(MemberDto::from).collect(),
            user_role: user.role(),
        })
    }

    /// Joining replaces any previous membership.
    pub async fn join(
        &self,
        user_id: &str,
        request: JoinOrganizationRequest,
    ) -> AppResult<OrganizationDto> {
        request.validate()?;
        require_non_blank("Organization ID", &request.organization_id)?;

        let organization = self
            .organizations
            .find_by_id(request.organization_id.trim())
            .await?
            .ok_or_else(|| AppError::NotFound("Organization not found".to_string()))?;

        self.users
            .set_membership(user_id, Some(Membership::member(&organization.id)))
            .await?;

        log::info!("User {} joined organization {}", user_id, organization.id);
        Ok(organization.into())
    }

    pub async fn leave(&self, user_id: &str) -> AppResult<()> {
        self.users.set_membership(user_id, None).await?;
        log::info!("User {} left their organization", user_id);
        Ok(())
    }

    /// Only an admin may remove, and only members of the admin's own
    /// organization can be removed.
    pub async fn remove_member(&self, actor_id: &str, member_id: &str) -> AppResult<()> {
        let actor = self.user(actor_id).await?;

        let organization_id = match &actor.membership {
            Some(Membership {
                organization_id,
                role: MemberRole::Admin,
            }) => organization_id.clone(),
            _ => {
                return Err(AppError::Forbidden(
                    "Only admins can remove members".to_string(),
                ))
            }
        };

        let in_same_organization = self
            .users
            .find_by_id(member_id)
            .await?
            .is_some_and(|member| member.organization_id() == Some(organization_id.as_str()));

        if !in_same_organization {
            return Err(AppError::NotFound(format!(
                "Member with id '{}' not found in organization",
                member_id
            )));
        }

        self.users.set_membership(member_id, None).await?;

        log::info!(
            "Admin {} removed user {} from organization {}",
            actor_id,
            member_id,
            organization_id
        );
        Ok(())
    }

    async fn user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }
}
