use crud::{CrudRepository, CrudResult, CrudService};
use domain_events::{Event, EventService};
use domain_users::User;
use tracing::instrument;

use crate::models::{EventInscription, EventInscriptionId};
use crate::repository::InscriptionRepository;

/// Sign-ups linking users to events.
///
/// Registration and character assignment check that the referenced event,
/// user and character exist.
pub struct InscriptionService<R, ER, UR> {
    inscriptions: CrudService<EventInscription, R>,
    events: EventService<ER>,
    users: CrudService<User, UR>,
}

impl<R, ER, UR> InscriptionService<R, ER, UR>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    pub fn new(repository: R, events: EventService<ER>, users: CrudService<User, UR>) -> Self {
        Self {
            inscriptions: CrudService::new(repository),
            events,
            users,
        }
    }

    pub fn crud(&self) -> &CrudService<EventInscription, R> {
        &self.inscriptions
    }

    pub async fn find_all(&self) -> CrudResult<Vec<EventInscription>> {
        self.inscriptions.find_all().await
    }

    pub async fn get(&self, event: &str, user: &str) -> CrudResult<EventInscription> {
        self.inscriptions
            .get(&EventInscriptionId::new(event, user))
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_by_event(&self, event: &str) -> CrudResult<Vec<EventInscription>> {
        self.inscriptions.repository().find_by_event(event).await
    }

    /// Sign a user up for an event.
    #[instrument(skip_all, fields(id = %inscription.id))]
    pub async fn register(&self, mut inscription: EventInscription) -> CrudResult<EventInscription> {
        self.inscriptions.validate(&inscription)?;
        self.inscriptions.check_doesnt_exist(&inscription.id).await?;
        self.users.check_exists(&inscription.id.user).await?;

        inscription.character = self
            .canonical_character(&inscription.id.event, inscription.character.as_deref())
            .await?;
        self.inscriptions.save(inscription).await
    }

    /// Overwrite the inscription stored under `event`/`user`.
    #[instrument(skip(self, incoming))]
    pub async fn update(
        &self,
        event: &str,
        user: &str,
        mut incoming: EventInscription,
    ) -> CrudResult<EventInscription> {
        let id = EventInscriptionId::new(event, user);
        self.inscriptions.check_exists(&id).await?;

        incoming.character = self
            .canonical_character(event, incoming.character.as_deref())
            .await?;
        self.inscriptions.update(&id, incoming).await
    }

    pub async fn delete(&self, event: &str, user: &str) -> CrudResult<()> {
        self.inscriptions
            .delete_by_id(&EventInscriptionId::new(event, user))
            .await
    }

    /// Assign a character from any group of the inscription's event. The
    /// stored name uses the character's own spelling.
    #[instrument(skip(self))]
    pub async fn assign_character(
        &self,
        event: &str,
        user: &str,
        character: &str,
    ) -> CrudResult<EventInscription> {
        let mut inscription = self.get(event, user).await?;
        let character = self.events.find_character(event, character).await?;

        inscription.character = Some(character.name);
        self.inscriptions.save(inscription).await
    }

    /// Checks the event exists and resolves `character` against its groups.
    async fn canonical_character(
        &self,
        event: &str,
        character: Option<&str>,
    ) -> CrudResult<Option<String>> {
        match character {
            Some(name) => Ok(Some(self.events.find_character(event, name).await?.name)),
            None => {
                self.events.get(event).await?;
                Ok(None)
            }
        }
    }
}

impl<R, ER, UR> Clone for InscriptionService<R, ER, UR> {
    fn clone(&self) -> Self {
        Self {
            inscriptions: self.inscriptions.clone(),
            events: self.events.clone(),
            users: self.users.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crud::{CrudError, InMemoryRepository};
    use domain_events::{Character, CharacterGroup};

    type TestService = InscriptionService<
        InMemoryRepository<EventInscription>,
        InMemoryRepository<Event>,
        InMemoryRepository<User>,
    >;

    fn service() -> TestService {
        let events = EventService::new(InMemoryRepository::with_items([
            Event::new("Hierro").with_groups([CharacterGroup::new("Crew")
                .with_characters([Character::new("Capitana Alba"), Character::new("Grumete")])]),
            Event::new("Bronce"),
        ]));
        let users = CrudService::new(InMemoryRepository::with_items([
            User::new("alba", "hash"),
            User::new("bruno", "hash"),
        ]));
        InscriptionService::new(InMemoryRepository::new(), events, users)
    }

    #[tokio::test]
    async fn test_register_requires_event_and_user() {
        let service = service();

        let err = service
            .register(EventInscription::new("Plata", "alba"))
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "Event", .. }));

        let err = service
            .register(EventInscription::new("Hierro", "carla"))
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "User", .. }));

        service
            .register(EventInscription::new("Hierro", "alba"))
            .await
            .unwrap();
        let err = service
            .register(EventInscription::new("Hierro", "alba"))
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_register_resolves_character_name() {
        let service = service();
        let created = service
            .register(EventInscription {
                character: Some("grumete".into()),
                ..EventInscription::new("Hierro", "alba")
            })
            .await
            .unwrap();
        assert_eq!(created.character.as_deref(), Some("Grumete"));
    }

    #[tokio::test]
    async fn test_find_by_event() {
        let service = service();
        for (event, user) in [("Hierro", "alba"), ("Hierro", "bruno"), ("Bronce", "alba")] {
            service
                .register(EventInscription::new(event, user))
                .await
                .unwrap();
        }

        let found = service.find_by_event("Hierro").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|i| i.id.event == "Hierro"));
    }

    #[tokio::test]
    async fn test_assign_character() {
        let service = service();
        service
            .register(EventInscription::new("Hierro", "alba"))
            .await
            .unwrap();

        let assigned = service
            .assign_character("Hierro", "alba", "CAPITANA ALBA")
            .await
            .unwrap();
        assert_eq!(assigned.character.as_deref(), Some("Capitana Alba"));
        assert_eq!(service.get("Hierro", "alba").await.unwrap(), assigned);

        let err = service
            .assign_character("Hierro", "alba", "Nadie")
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "Character", .. }));

        let err = service
            .assign_character("Hierro", "bruno", "Grumete")
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { resource: "EventInscription", .. }));
    }

    #[tokio::test]
    async fn test_update_keeps_key_and_checks_character() {
        let service = service();
        service
            .register(EventInscription::new("Hierro", "alba"))
            .await
            .unwrap();

        let updated = service
            .update(
                "Hierro",
                "alba",
                EventInscription {
                    character: Some("grumete".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, EventInscriptionId::new("Hierro", "alba"));
        assert_eq!(updated.character.as_deref(), Some("Grumete"));

        let err = service
            .update("Hierro", "bruno", EventInscription::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CrudError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = service();
        service
            .register(EventInscription::new("Hierro", "alba"))
            .await
            .unwrap();

        service.delete("Hierro", "alba").await.unwrap();
        service.delete("Hierro", "alba").await.unwrap();
        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generated_ids_are_unsupported() {
        let err = service().crud().create_generated().await.unwrap_err();
        assert!(matches!(err, CrudError::IdRequired { .. }));
    }
}
