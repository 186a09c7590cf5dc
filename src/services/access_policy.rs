use std::collections::BTreeSet;

use crate::{
    errors::AppResult,
    models::domain::{ContentArtifact, User},
    repositories::UserRepository,
};

/// Owner ids whose content a viewer may read. A viewer outside any
/// organization sees only their own content; a member sees everything owned
/// by anyone currently in the same organization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessScope {
    owner_ids: BTreeSet<String>,
}

impl AccessScope {
    pub fn owner_ids(&self) -> Vec<String> {
        self.owner_ids.iter().cloned().collect()
    }

    pub fn includes(&self, owner_user_id: &str) -> bool {
        self.owner_ids.contains(owner_user_id)
    }

    pub fn can_view(&self, artifact: &ContentArtifact) -> bool {
        self.includes(&artifact.owner_user_id)
    }
}

/// Computed from the current membership on every call, so leaving or being
/// removed from an organization takes effect immediately.
pub async fn resolve_scope(users: &dyn UserRepository, viewer: &User) -> AppResult<AccessScope> {
    let mut owner_ids = BTreeSet::from([viewer.id.clone()]);

    if let Some(organization_id) = viewer.organization_id() {
        let members = users.find_by_organization(organization_id).await?;
        owner_ids.extend(members.into_iter().map(|member| member.id));
    }

    Ok(AccessScope { owner_ids })
}

#[cfg(test)]
impl AccessScope {
    pub fn of(ids: &[&str]) -> Self {
        AccessScope {
            owner_ids: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}
