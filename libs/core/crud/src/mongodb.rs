//! MongoDB implementation of CrudRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::CrudResult;
use crate::repository::CrudRepository;
use crate::resource::MongoResource;

/// Stores each resource type in its own collection, keyed by
/// [`MongoResource::KEY_FIELD`].
pub struct MongoRepository<T: MongoResource> {
    collection: Collection<T>,
}

impl<T: MongoResource> MongoRepository<T> {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, T::COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<T>(collection_name),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    /// Create the unique index on the key field. Safe to call on every start.
    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    pub async fn ensure_indexes(&self) -> CrudResult<()> {
        let index = IndexModel::builder()
            .keys(T::key_index())
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }
}

impl<T: MongoResource> Clone for MongoRepository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

#[async_trait]
impl<T: MongoResource> CrudRepository<T> for MongoRepository<T> {
    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %id))]
    async fn find_by_id(&self, id: &T::Id) -> CrudResult<Option<T>> {
        let element = self.collection.find_one(T::key_filter(id)?).await?;
        Ok(element)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION))]
    async fn find_all(&self) -> CrudResult<Vec<T>> {
        let cursor = self.collection.find(doc! {}).await?;
        let elements: Vec<T> = cursor.try_collect().await?;
        Ok(elements)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %element.id()))]
    async fn save(&self, element: T) -> CrudResult<T> {
        let filter = T::key_filter(&element.id())?;
        self.collection
            .replace_one(filter, &element)
            .upsert(true)
            .await?;

        tracing::debug!("Document saved");
        Ok(element)
    }

    #[instrument(skip_all, fields(collection = T::COLLECTION, id = %id))]
    async fn delete_by_id(&self, id: &T::Id) -> CrudResult<()> {
        let result = self.collection.delete_one(T::key_filter(id)?).await?;
        tracing::debug!(deleted = result.deleted_count, "Delete completed");
        Ok(())
    }
}
