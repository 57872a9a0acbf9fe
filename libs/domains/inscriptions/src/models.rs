use crud::{CrudResult, MongoResource, Resource};
use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// Composite key: one inscription per user and event.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Validate,
)]
#[serde(default)]
pub struct EventInscriptionId {
    #[validate(length(min = 1, max = 128), custom(function = "crud::validate_key"))]
    #[schema(example = "Sangre de Hierro")]
    pub event: String,
    #[validate(length(min = 1, max = 64))]
    #[schema(example = "alba")]
    pub user: String,
}

impl EventInscriptionId {
    pub fn new(event: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            user: user.into(),
        }
    }
}

impl fmt::Display for EventInscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event, self.user)
    }
}

/// A user signed up to an event, optionally assigned a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct EventInscription {
    #[validate(nested)]
    pub id: EventInscriptionId,
    /// Name of a character from one of the event's groups
    #[validate(length(min = 1, max = 128))]
    pub character: Option<String>,
}

impl EventInscription {
    pub fn new(event: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            id: EventInscriptionId::new(event, user),
            character: None,
        }
    }
}

impl Resource for EventInscription {
    type Id = EventInscriptionId;
    const NAME: &'static str = "EventInscription";

    fn id(&self) -> EventInscriptionId {
        self.id.clone()
    }

    fn set_id(&mut self, id: EventInscriptionId) {
        self.id = id;
    }
}

impl MongoResource for EventInscription {
    const COLLECTION: &'static str = "event_inscriptions";
    const KEY_FIELD: &'static str = "id";

    fn key_filter(id: &EventInscriptionId) -> CrudResult<Document> {
        Ok(doc! { "id.event": id.event.as_str(), "id.user": id.user.as_str() })
    }

    fn key_index() -> Document {
        doc! { "id.event": 1, "id.user": 1 }
    }
}
