use axum::Router;
use crud::{CrudRepository, handlers};
use utoipa::OpenApi;

use crate::models::Role;
use crate::service::RoleService;

/// OpenAPI documentation for the Roles API
#[derive(OpenApi)]
#[openapi(
    components(schemas(Role)),
    tags(
        (name = "Roles", description = "Role catalogue; users reference roles by name")
    )
)]
pub struct ApiDoc;

/// Standard CRUD routes for roles
pub fn router<R: CrudRepository<Role> + 'static>(service: RoleService<R>) -> Router {
    handlers::router(service)
}
