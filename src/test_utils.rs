use crate::models::domain::{ContentArtifact, ContentType, Membership, User};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// A user with no organization.
    pub fn solo_user(name: &str) -> User {
        User::test_user(name)
    }

    pub fn member_of(name: &str, organization_id: &str) -> User {
        let mut user = User::test_user(name);
        user.membership = Some(Membership::member(organization_id));
        user
    }

    pub fn admin_of(name: &str, organization_id: &str) -> User {
        let mut user = User::test_user(name);
        user.membership = Some(Membership::admin(organization_id));
        user
    }

    pub fn artifact_owned_by(owner: &User, subject: &str, content_type: ContentType) -> ContentArtifact {
        let mut artifact = ContentArtifact::new(
            &format!("{} notes", subject),
            "# Notes",
            subject,
            "Basics",
            "easy",
            content_type,
            "English",
        );
        artifact.owner_user_id = owner.id.clone();
        artifact.creator_name = owner.name.clone();
        artifact.creator_email = owner.email.clone();
        artifact
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::{ContentType, MemberRole};

    #[test]
    fn test_fixture_roles() {
        assert_eq!(solo_user("Cleo").membership, None);
        assert_eq!(member_of("Ben", "org-1").role(), MemberRole::Member);
        assert!(admin_of("Ada", "org-1").is_admin_of("org-1"));
    }

    #[test]
    fn test_artifact_is_stamped_with_owner() {
        let owner = solo_user("Cleo");
        let artifact = artifact_owned_by(&owner, "Physics", ContentType::Exercise);

        assert_eq!(artifact.owner_user_id, owner.id);
        assert_eq!(artifact.creator_email, "cleo@example.com");
    }
}
