use async_trait::async_trait;
use crud::{CrudRepository, CrudResult, InMemoryRepository, MongoRepository};
use futures::TryStreamExt;
use mongodb::bson::doc;
use tracing::instrument;

use crate::models::EventInscription;

/// Inscription storage with a lookup by event.
#[async_trait]
pub trait InscriptionRepository: CrudRepository<EventInscription> {
    async fn find_by_event(&self, event: &str) -> CrudResult<Vec<EventInscription>>;
}

#[async_trait]
impl InscriptionRepository for MongoRepository<EventInscription> {
    #[instrument(skip(self))]
    async fn find_by_event(&self, event: &str) -> CrudResult<Vec<EventInscription>> {
        let cursor = self.collection().find(doc! { "id.event": event }).await?;
        let inscriptions: Vec<EventInscription> = cursor.try_collect().await?;
        Ok(inscriptions)
    }
}

#[async_trait]
impl InscriptionRepository for InMemoryRepository<EventInscription> {
    async fn find_by_event(&self, event: &str) -> CrudResult<Vec<EventInscription>> {
        Ok(self.filter(|i| i.id.event == event).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_find_by_event() {
        let repo = InMemoryRepository::with_items([
            EventInscription::new("Hierro", "bruno"),
            EventInscription::new("Hierro", "alba"),
            EventInscription::new("Bronce", "alba"),
        ]);

        let found = repo.find_by_event("Hierro").await.unwrap();
        let users: Vec<_> = found.iter().map(|i| i.id.user.as_str()).collect();
        assert_eq!(users, ["alba", "bruno"]);

        assert!(repo.find_by_event("hierro").await.unwrap().is_empty());
    }
}
