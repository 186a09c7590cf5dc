use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::{Database, CONTENTS_COLLECTION},
    errors::AppResult,
    models::domain::{ContentArtifact, ContentStats, ContentType},
};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn create(&self, artifact: ContentArtifact) -> AppResult<ContentArtifact>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ContentArtifact>>;
    /// Newest first, restricted to the given owners.
    async fn find_by_owners(
        &self,
        owner_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ContentArtifact>, i64)>;
    async fn stats_for_owners(&self, owner_ids: &[String]) -> AppResult<ContentStats>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoContentRepository {
    collection: Collection<ContentArtifact>,
}

impl MongoContentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(CONTENTS_COLLECTION);
        Self { collection }
    }

    fn owners_filter(owner_ids: &[String]) -> Document {
        doc! { "owner_user_id": { "$in": owner_ids } }
    }
}

#[async_trait]
impl ContentRepository for MongoContentRepository {
    async fn create(&self, artifact: ContentArtifact) -> AppResult<ContentArtifact> {
        self.collection.insert_one(&artifact).await?;
        Ok(artifact)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<ContentArtifact>> {
        let artifact = self.collection.find_one(doc! { "id": id }).await?;
        Ok(artifact)
    }

    async fn find_by_owners(
        &self,
        owner_ids: &[String],
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ContentArtifact>, i64)> {
        let filter = Self::owners_filter(owner_ids);

        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "created_at": -1, "id": 1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(find_options)
            .await?;
        let items: Vec<ContentArtifact> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn stats_for_owners(&self, owner_ids: &[String]) -> AppResult<ContentStats> {
        let filter = Self::owners_filter(owner_ids);

        let count_type = |content_type: ContentType| {
            let mut filter = filter.clone();
            filter.insert("content_type", content_type.as_str());
            self.collection.count_documents(filter)
        };

        let total_content = self.collection.count_documents(filter.clone()).await?;
        let learning_pages = count_type(ContentType::LearningPage).await?;
        let exercises = count_type(ContentType::Exercise).await?;
        let exercises_with_solution = count_type(ContentType::ExerciseWithSolution).await?;
        let subjects = self.collection.distinct("subject", filter.clone()).await?;

        Ok(ContentStats {
            total_content,
            learning_pages,
            exercises,
            exercises_with_solution,
            unique_subjects: subjects.len() as u64,
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for contents collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_user_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes(vec![id_index, owner_index])
            .await?;

        log::info!("Successfully created indexes for contents collection");
        Ok(())
    }
}
