use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, ORGANIZATIONS_COLLECTION},
    errors::AppResult,
    models::domain::Organization,
};

#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create(&self, organization: Organization) -> AppResult<Organization>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Organization>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoOrganizationRepository {
    collection: Collection<Organization>,
}

impl MongoOrganizationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(ORGANIZATIONS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl OrganizationRepository for MongoOrganizationRepository {
    async fn create(&self, organization: Organization) -> AppResult<Organization> {
        self.collection.insert_one(&organization).await?;
        Ok(organization)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Organization>> {
        let organization = self.collection.find_one(doc! { "id": id }).await?;
        Ok(organization)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for organizations collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for organizations collection");
        Ok(())
    }
}
