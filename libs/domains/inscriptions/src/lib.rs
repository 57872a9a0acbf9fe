//! Event Inscriptions Domain
//!
//! An inscription links a user to an event under the composite key
//! `(event, user)` and may name the character the user will play.
//!
//! ```rust,ignore
//! use domain_inscriptions::{InscriptionService, MongoInscriptionRepository, handlers};
//!
//! let service = InscriptionService::new(
//!     MongoInscriptionRepository::new(&db),
//!     event_service,
//!     user_service.crud().clone(),
//! );
//! let router = handlers::router(service);
//! ```

pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use handlers::ApiDoc;
pub use models::{EventInscription, EventInscriptionId};
pub use repository::InscriptionRepository;
pub use service::InscriptionService;

pub type MongoInscriptionRepository = crud::MongoRepository<EventInscription>;
pub type InMemoryInscriptionRepository = crud::InMemoryRepository<EventInscription>;
