//! API routes, nested under `/api` by `axum_helpers::create_router`.
//!
//! `POST /login` and `POST /user` are public; every other route requires a
//! bearer token.

pub mod health;


use axum::{Router, middleware};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use crud::CrudRepository;
use domain_events::{Event, EventService, MongoEventRepository};
use domain_inscriptions::{InscriptionRepository, InscriptionService, MongoInscriptionRepository};
use domain_roles::{MongoRoleRepository, Role, RoleService};
use domain_users::{MongoUserRepository, User, UserService};
use mongodb::Database;
use std::sync::Arc;

use crate::state::AppState;

/// Every domain service, wired over one set of repositories.
pub struct Services<UR, RR, ER, IR> {
    pub roles: RoleService<RR>,
    pub events: EventService<ER>,
    pub users: Arc<UserService<UR, RR>>,
    pub inscriptions: InscriptionService<IR, ER, UR>,
    pub auth: JwtAuth,
}

impl<UR, RR, ER, IR> Services<UR, RR, ER, IR>
where
    UR: CrudRepository<User> + 'static,
    RR: CrudRepository<Role> + 'static,
    ER: CrudRepository<Event> + 'static,
    IR: InscriptionRepository + 'static,
{
    pub fn new(users: UR, roles: RR, events: ER, inscriptions: IR, auth: JwtAuth) -> Self {
        let roles = RoleService::new(roles);
        let events = EventService::new(events);
        let users = Arc::new(UserService::new(users, roles.clone(), auth.clone()));
        let inscriptions =
            InscriptionService::new(inscriptions, events.clone(), users.crud().clone());

        Self {
            roles,
            events,
            users,
            inscriptions,
            auth,
        }
    }
}

pub type MongoServices = Services<
    MongoUserRepository,
    MongoRoleRepository,
    MongoEventRepository,
    MongoInscriptionRepository,
>;

impl MongoServices {
    /// Services over MongoDB, creating the unique key indexes first.
    pub async fn connect(db: &Database, auth: JwtAuth) -> eyre::Result<Self> {
        let users = MongoUserRepository::new(db);
        let roles = MongoRoleRepository::new(db);
        let events = MongoEventRepository::new(db);
        let inscriptions = MongoInscriptionRepository::new(db);

        users.ensure_indexes().await?;
        roles.ensure_indexes().await?;
        events.ensure_indexes().await?;
        inscriptions.ensure_indexes().await?;
        tracing::info!("MongoDB indexes ensured");

        Ok(Self::new(users, roles, events, inscriptions, auth))
    }
}

/// All API routes for the running service.
pub async fn router(state: &AppState) -> eyre::Result<Router> {
    let services = MongoServices::connect(&state.db, state.auth.clone()).await?;
    Ok(routes(services).merge(health::router(state.db.clone())))
}

/// Resource routes over any repositories.
pub fn routes<UR, RR, ER, IR>(services: Services<UR, RR, ER, IR>) -> Router
where
    UR: CrudRepository<User> + 'static,
    RR: CrudRepository<Role> + 'static,
    ER: CrudRepository<Event> + 'static,
    IR: InscriptionRepository + 'static,
{
    let protected = Router::new()
        .nest("/role", domain_roles::handlers::router(services.roles))
        .nest("/event", domain_events::handlers::router(services.events))
        .nest(
            "/user",
            domain_users::handlers::router(services.users.clone()),
        )
        .nest(
            "/eventInscription",
            domain_inscriptions::handlers::router(services.inscriptions),
        )
        .route_layer(middleware::from_fn_with_state(
            services.auth,
            jwt_auth_middleware,
        ));

    let public = Router::new()
        .merge(domain_users::handlers::auth_router(services.users.clone()))
        .nest("/user", domain_users::handlers::public_router(services.users));

    public.merge(protected)
}
