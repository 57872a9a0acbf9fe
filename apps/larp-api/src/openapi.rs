//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "LARP API",
        version = "0.1.0",
        description = "Events, character groups, users, roles and event inscriptions for live-action role-play",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_users::AuthApiDoc),
        (path = "/api/user", api = domain_users::ApiDoc),
        (path = "/api/role", api = domain_roles::ApiDoc),
        (path = "/api/event", api = domain_events::ApiDoc),
        (path = "/api/eventInscription", api = domain_inscriptions::ApiDoc)
    )
)]
pub struct ApiDoc;
