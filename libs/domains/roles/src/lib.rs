//! Roles Domain
//!
//! ```rust,ignore
//! use domain_roles::{MongoRoleRepository, RoleService, handlers};
//!
//! let service = RoleService::new(MongoRoleRepository::new(&db));
//! let router = handlers::router(service);
//! ```

pub mod handlers;
pub mod models;
pub mod service;

pub use handlers::ApiDoc;
pub use models::Role;
pub use service::RoleService;

pub type MongoRoleRepository = crud::MongoRepository<Role>;
pub type InMemoryRoleRepository = crud::InMemoryRepository<Role>;
