use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{Database, USERS_COLLECTION},
    errors::{AppError, AppResult},
    models::domain::{Membership, User},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_by_organization(&self, organization_id: &str) -> AppResult<Vec<User>>;
    /// Replaces or clears the membership in a single write, so organization
    /// and role can never be observed half-updated.
    async fn set_membership(&self, user_id: &str, membership: Option<Membership>)
        -> AppResult<User>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USERS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await.map_err(|e| {
            match AppError::from(e) {
                AppError::AlreadyExists(_) => AppError::AlreadyExists(format!(
                    "User with email '{}' already exists",
                    user.email
                )),
                other => other,
            }
        })?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn find_by_organization(&self, organization_id: &str) -> AppResult<Vec<User>> {
        let cursor = self
            .collection
            .find(doc! { "membership.organization_id": organization_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn set_membership(
        &self,
        user_id: &str,
        membership: Option<Membership>,
    ) -> AppResult<User> {
        let update = match membership {
            Some(membership) => doc! { "$set": { "membership": to_bson(&membership)? } },
            None => doc! { "$unset": { "membership": "" } },
        };

        self.collection
            .find_one_and_update(doc! { "id": user_id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for users collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let organization_index = IndexModel::builder()
            .keys(doc! { "membership.organization_id": 1 })
            .options(
                IndexOptions::builder()
                    .name("membership_organization".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![id_index, email_index, organization_index])
            .await?;

        log::info!("Successfully created indexes for users collection");
        Ok(())
    }
}
