//! Generic CRUD plumbing shared by every LARP resource.
//!
//! ```text
//! ┌─────────────┐
//! │  handlers   │  ← generic router for string-keyed resources
//! └──────┬──────┘
//! ┌──────▼──────┐
//! │ CrudService │  ← existence checks, validation, copy-on-update, id generation
//! └──────┬──────┘
//! ┌──────▼──────────────┐
//! │ CrudRepository      │  ← MongoRepository / InMemoryRepository
//! └─────────────────────┘
//! ```
//!
//! ```rust,ignore
//! use crud::{CrudService, MongoRepository, handlers};
//!
//! let service = CrudService::new(MongoRepository::<Role>::new(&db));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod mongodb;
pub mod repository;
pub mod resource;
pub mod service;

pub use error::{ALREADY_EXISTS, CrudError, CrudResult, DOESNT_EXIST, ID_REQUIRED};
pub use mongodb::MongoRepository;
pub use repository::{CrudRepository, InMemoryRepository};
pub use resource::{GENERATED_SEGMENT, MongoResource, Resource, validate_key};
pub use service::CrudService;
