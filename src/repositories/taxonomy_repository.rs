use std::collections::HashMap;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{TaxonomyEntry, TaxonomyKind},
};

/// One store for all four label lists; every call names the list it targets.
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    async fn create(&self, kind: TaxonomyKind, entry: TaxonomyEntry) -> AppResult<TaxonomyEntry>;
    async fn find_by_name(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        name: &str,
    ) -> AppResult<Option<TaxonomyEntry>>;
    /// Sorted by name.
    async fn list_by_owner(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TaxonomyEntry>, i64)>;
    /// Returns `false` when no entry with that id belongs to the owner.
    async fn delete_owned(&self, kind: TaxonomyKind, owner_user_id: &str, id: &str)
        -> AppResult<bool>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoTaxonomyRepository {
    collections: HashMap<TaxonomyKind, Collection<TaxonomyEntry>>,
}

impl MongoTaxonomyRepository {
    pub fn new(db: &Database) -> Self {
        let collections = TaxonomyKind::ALL
            .into_iter()
            .map(|kind| (kind, db.get_collection(kind.collection_name())))
            .collect();
        Self { collections }
    }

    fn collection(&self, kind: TaxonomyKind) -> AppResult<&Collection<TaxonomyEntry>> {
        self.collections.get(&kind).ok_or_else(|| {
            AppError::InternalError(format!("No collection registered for {}", kind))
        })
    }
}

#[async_trait]
impl TaxonomyRepository for MongoTaxonomyRepository {
    async fn create(&self, kind: TaxonomyKind, entry: TaxonomyEntry) -> AppResult<TaxonomyEntry> {
        self.collection(kind)?
            .insert_one(&entry)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::AlreadyExists(_) => {
                    AppError::AlreadyExists(format!("{} '{}' already exists", kind, entry.name))
                }
                other => other,
            })?;
        Ok(entry)
    }

    async fn find_by_name(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        name: &str,
    ) -> AppResult<Option<TaxonomyEntry>> {
        let entry = self
            .collection(kind)?
            .find_one(doc! { "owner_user_id": owner_user_id, "name": name })
            .await?;
        Ok(entry)
    }

    async fn list_by_owner(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<TaxonomyEntry>, i64)> {
        let collection = self.collection(kind)?;
        let filter = doc! { "owner_user_id": owner_user_id };

        let total = collection.count_documents(filter.clone()).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "name": 1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = collection.find(filter).with_options(find_options).await?;
        let items: Vec<TaxonomyEntry> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn delete_owned(
        &self,
        kind: TaxonomyKind,
        owner_user_id: &str,
        id: &str,
    ) -> AppResult<bool> {
        let result = self
            .collection(kind)?
            .delete_one(doc! { "id": id, "owner_user_id": owner_user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        for kind in TaxonomyKind::ALL {
            log::info!("Creating indexes for {} collection", kind.collection_name());

            let id_index = IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("id_unique".to_string())
                        .build(),
                )
                .build();

            let name_index = IndexModel::builder()
                .keys(doc! { "owner_user_id": 1, "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("owner_name_unique".to_string())
                        .build(),
                )
                .build();

            self.collection(kind)?
                .create_indexes(vec![id_index, name_index])
                .await?;
        }

        log::info!("Successfully created indexes for taxonomy collections");
        Ok(())
    }
}
