use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CrudResult;
use crate::resource::Resource;

/// Persistence interface shared by every resource type.
#[async_trait]
pub trait CrudRepository<T: Resource>: Send + Sync {
    async fn find_by_id(&self, id: &T::Id) -> CrudResult<Option<T>>;

    async fn find_all(&self) -> CrudResult<Vec<T>>;

    /// Insert or replace the element stored under its key.
    async fn save(&self, element: T) -> CrudResult<T>;

    /// Remove the element if present. Absent keys are not an error.
    async fn delete_by_id(&self, id: &T::Id) -> CrudResult<()>;
}

/// Process-local repository, useful for tests and local development.
pub struct InMemoryRepository<T: Resource> {
    items: Arc<RwLock<HashMap<T::Id, T>>>,
}

impl<T: Resource> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Repository pre-populated with `items`.
    pub fn with_items(items: impl IntoIterator<Item = T>) -> Self {
        let map = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: Arc::new(RwLock::new(map)),
        }
    }

    /// Snapshot of stored values matching `predicate`.
    pub async fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let items = self.items.read().await;
        let mut matching: Vec<T> = items.values().filter(|v| predicate(v)).cloned().collect();
        matching.sort_by_key(|v| v.id().to_string());
        matching
    }
}

impl<T: Resource> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

#[async_trait]
impl<T: Resource> CrudRepository<T> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: &T::Id) -> CrudResult<Option<T>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> CrudResult<Vec<T>> {
        Ok(self.filter(|_| true).await)
    }

    async fn save(&self, element: T) -> CrudResult<T> {
        self.items
            .write()
            .await
            .insert(element.id(), element.clone());
        Ok(element)
    }

    async fn delete_by_id(&self, id: &T::Id) -> CrudResult<()> {
        self.items.write().await.remove(id);
        Ok(())
    }
}
