//! Events Domain
//!
//! Events own an ordered list of character groups, each owning its
//! characters. Groups and characters are only reachable through their event.
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← generic CRUD routes + /{id}/characterGroup/...
//! └──────┬───────┘
//! ┌──────▼───────┐
//! │ EventService │  ← case-insensitive nested lookups
//! └──────┬───────┘
//! ┌──────▼───────┐
//! │ CrudService  │  ← shared CRUD contract (crate `crud`)
//! └──────────────┘
//! ```
//!
//! ```rust,ignore
//! use domain_events::{EventService, MongoEventRepository, handlers};
//!
//! let service = EventService::new(MongoEventRepository::new(&db));
//! let router = handlers::router(service);
//! ```

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{Character, CharacterGroup, Event};
pub use service::EventService;

pub type MongoEventRepository = crud::MongoRepository<Event>;
pub type InMemoryEventRepository = crud::InMemoryRepository<Event>;
