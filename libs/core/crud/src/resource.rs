use mongodb::bson::{self, Document};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use validator::{Validate, ValidationError};

use crate::error::CrudResult;

/// Path segment of the `POST /generated` route. Keys equal to it would be
/// shadowed by that route, so [`validate_key`] rejects them.
pub const GENERATED_SEGMENT: &str = "generated";

/// Field validator for natural keys: `#[validate(custom(function = "crud::validate_key"))]`.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    if key == GENERATED_SEGMENT {
        let mut error = ValidationError::new("reserved_key");
        error.message = Some(format!("'{GENERATED_SEGMENT}' is reserved").into());
        return Err(error);
    }
    Ok(())
}

/// An entity managed through [`CrudService`](crate::CrudService), keyed by a
/// natural identifier.
pub trait Resource:
    Clone + Debug + Default + Send + Sync + Unpin + Serialize + DeserializeOwned + Validate + 'static
{
    type Id: Clone
        + Debug
        + Display
        + Eq
        + Hash
        + Send
        + Sync
        + Serialize
        + DeserializeOwned
        + 'static;

    /// Name used in error messages, e.g. `"Event"`.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Default element for `id`, used by `create(id)`.
    fn build(id: Self::Id) -> Self {
        let mut element = Self::default();
        element.set_id(id);
        element
    }

    /// Identifier strategy for `create()`. `None` means callers must supply one.
    fn generate_id() -> Option<Self::Id> {
        None
    }

    /// Overwrite every field with `incoming`, keeping the stored key.
    fn copy_from(&mut self, incoming: Self) {
        let id = self.id();
        *self = incoming;
        self.set_id(id);
    }
}

/// Storage mapping for resources persisted in MongoDB.
pub trait MongoResource: Resource {
    /// One collection per resource type
    const COLLECTION: &'static str;

    /// Document field holding the natural key
    const KEY_FIELD: &'static str;

    fn key_filter(id: &Self::Id) -> CrudResult<Document> {
        let mut filter = Document::new();
        filter.insert(Self::KEY_FIELD, bson::to_bson(id)?);
        Ok(filter)
    }

    fn key_index() -> Document {
        let mut keys = Document::new();
        keys.insert(Self::KEY_FIELD, 1);
        keys
    }
}
