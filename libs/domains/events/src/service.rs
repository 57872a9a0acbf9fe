use crud::{CrudError, CrudRepository, CrudResult, CrudService};
use tracing::instrument;

use crate::models::{Character, CharacterGroup, Event};

/// Event CRUD plus read-only navigation into groups and characters.
///
/// Every lookup re-fetches the event, so results always reflect the stored
/// document.
pub struct EventService<R> {
    crud: CrudService<Event, R>,
}

impl<R: CrudRepository<Event>> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            crud: CrudService::new(repository),
        }
    }

    pub fn crud(&self) -> &CrudService<Event, R> {
        &self.crud
    }

    pub async fn get(&self, event: &str) -> CrudResult<Event> {
        self.crud.get(&event.to_string()).await
    }

    #[instrument(skip(self))]
    pub async fn character_groups(&self, event: &str) -> CrudResult<Vec<CharacterGroup>> {
        Ok(self.get(event).await?.character_groups)
    }

    #[instrument(skip(self))]
    pub async fn character_group(&self, event: &str, group: &str) -> CrudResult<CharacterGroup> {
        self.get(event)
            .await?
            .find_group(group)
            .cloned()
            .ok_or_else(|| CrudError::not_found("CharacterGroup", group))
    }

    pub async fn characters(&self, event: &str, group: &str) -> CrudResult<Vec<Character>> {
        Ok(self.character_group(event, group).await?.characters)
    }

    #[instrument(skip(self))]
    pub async fn character(
        &self,
        event: &str,
        group: &str,
        character: &str,
    ) -> CrudResult<Character> {
        self.character_group(event, group)
            .await?
            .find_character(character)
            .cloned()
            .ok_or_else(|| CrudError::not_found("Character", character))
    }

    /// Character with a matching name in any group of the event.
    pub async fn find_character(&self, event: &str, character: &str) -> CrudResult<Character> {
        self.get(event)
            .await?
            .find_character_anywhere(character)
            .cloned()
            .ok_or_else(|| CrudError::not_found("Character", character))
    }
}

impl<R> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            crud: self.crud.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crud::{DOESNT_EXIST, InMemoryRepository};

    fn service() -> EventService<InMemoryRepository<Event>> {
        EventService::new(InMemoryRepository::with_items([Event::new("Sangre de Hierro")
            .with_groups([
                CharacterGroup::new("Tripulación")
                    .with_characters([Character::new("Capitana Alba"), Character::new("Grumete")]),
                CharacterGroup::new("Guardia Real"),
            ])]))
    }

    #[tokio::test]
    async fn test_lists_groups_in_order() {
        let groups = service().character_groups("Sangre de Hierro").await.unwrap();
        let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["Tripulación", "Guardia Real"]);
    }

    #[tokio::test]
    async fn test_missing_event_is_not_found() {
        let err = service().character_groups("Otro").await.unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "Event", .. }));
        assert_eq!(err.code(), Some(DOESNT_EXIST));
    }

    #[tokio::test]
    async fn test_group_and_character_lookups() {
        let service = service();

        let group = service
            .character_group("Sangre de Hierro", "guardia real")
            .await
            .unwrap();
        assert_eq!(group.name, "Guardia Real");
        assert!(
            service
                .characters("Sangre de Hierro", "Guardia Real")
                .await
                .unwrap()
                .is_empty()
        );

        let character = service
            .character("Sangre de Hierro", "TRIPULACIÓN", "grumete")
            .await
            .unwrap();
        assert_eq!(character.name, "Grumete");
    }

    #[tokio::test]
    async fn test_missing_nested_elements_name_their_kind() {
        let service = service();

        let err = service
            .character_group("Sangre de Hierro", "Piratas")
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "CharacterGroup", .. }));

        let err = service
            .character("Sangre de Hierro", "Guardia Real", "Grumete")
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "Character", .. }));
    }

    #[tokio::test]
    async fn test_find_character_searches_every_group() {
        let service = service();
        let character = service
            .find_character("Sangre de Hierro", "capitana alba")
            .await
            .unwrap();
        assert_eq!(character.name, "Capitana Alba");
        assert!(service.find_character("Sangre de Hierro", "Nadie").await.is_err());
    }
}
