//! Users Domain
//!
//! Accounts keyed by username. Passwords are stored as Argon2 hashes and
//! never leave the service; the API speaks [`UserResponse`].
//!
//! ```text
//! ┌───────────────────────┐
//! │       Handlers        │  ← public (register, login) and protected routes
//! └──────────┬────────────┘
//! ┌──────────▼────────────┐
//! │      UserService      │  ← hashing, roles, login, PermissionEvaluator
//! └──────────┬────────────┘
//! ┌──────────▼────────────┐
//! │ CrudService<User> +   │
//! │ RoleService           │
//! └───────────────────────┘
//! ```
//!
//! ```rust,ignore
//! use domain_users::{MongoUserRepository, UserService, handlers};
//!
//! let service = Arc::new(UserService::new(MongoUserRepository::new(&db), roles, jwt_auth));
//! let public = handlers::public_router(service.clone());
//! let protected = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod permission;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthApiDoc};
pub use models::{LoginRequest, LoginResponse, User, UserResponse};
pub use permission::{Permission, PermissionEvaluator, SelfAccessEvaluator};
pub use service::UserService;

pub type MongoUserRepository = crud::MongoRepository<User>;
pub type InMemoryUserRepository = crud::InMemoryRepository<User>;
