use crud::{MongoResource, Resource};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Case-insensitive name comparison used by every nested lookup.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// A playable character inside a [`CharacterGroup`].
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    Validate,
)]
#[serde(default)]
pub struct Character {
    #[validate(length(min = 1, max = 128))]
    #[schema(example = "Capitana Alba")]
    pub name: String,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// A named set of characters within an event, e.g. a faction or a crew.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    Validate,
)]
#[serde(default)]
pub struct CharacterGroup {
    #[validate(length(min = 1, max = 128))]
    #[schema(example = "Tripulación del Albatros")]
    pub name: String,
    #[validate(length(max = 2048))]
    pub description: Option<String>,
    #[validate(nested)]
    pub characters: Vec<Character>,
}

impl CharacterGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_characters(mut self, characters: impl IntoIterator<Item = Character>) -> Self {
        self.characters = characters.into_iter().collect();
        self
    }

    /// First character whose name matches ignoring case.
    pub fn find_character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| same_name(&c.name, name))
    }
}

/// A LARP event, keyed by its name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    #[validate(length(min = 1, max = 128), custom(function = "crud::validate_key"))]
    #[schema(example = "Sangre de Hierro")]
    pub name: String,
    #[validate(length(max = 4096))]
    pub description: Option<String>,
    #[validate(nested)]
    pub character_groups: Vec<CharacterGroup>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = CharacterGroup>) -> Self {
        self.character_groups = groups.into_iter().collect();
        self
    }

    /// First group whose name matches ignoring case.
    pub fn find_group(&self, name: &str) -> Option<&CharacterGroup> {
        self.character_groups.iter().find(|g| same_name(&g.name, name))
    }

    /// First character with a matching name in any group, scanning groups in order.
    pub fn find_character_anywhere(&self, name: &str) -> Option<&Character> {
        self.character_groups
            .iter()
            .find_map(|g| g.find_character(name))
    }
}

impl Resource for Event {
    type Id = String;
    const NAME: &'static str = "Event";

    fn id(&self) -> String {
        self.name.clone()
    }

    fn set_id(&mut self, id: String) {
        self.name = id;
    }

    fn generate_id() -> Option<String> {
        Some(format!("event-{}", Uuid::now_v7()))
    }
}

impl MongoResource for Event {
    const COLLECTION: &'static str = "events";
    const KEY_FIELD: &'static str = "name";
}
