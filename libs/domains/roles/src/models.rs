use crud::{MongoResource, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A named permission group that users can hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default)]
pub struct Role {
    #[validate(length(min = 1, max = 64), custom(function = "crud::validate_key"))]
    #[schema(example = "organizer")]
    pub name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Resource for Role {
    type Id = String;
    const NAME: &'static str = "Role";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn set_id(&mut self, id: String) {
        self.name = id;
    }
}

impl MongoResource for Role {
    const COLLECTION: &'static str = "roles";
    const KEY_FIELD: &'static str = "name";
}
