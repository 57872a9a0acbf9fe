use axum::{Json, Router, extract::State, routing::get};
use axum_helpers::{
    AppPath,
    errors::responses::{InternalServerErrorResponse, NotFoundResponse},
};
use crud::{CrudRepository, CrudResult, handlers};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Character, CharacterGroup, Event};
use crate::service::EventService;

/// OpenAPI documentation for the Events API
#[derive(OpenApi)]
#[openapi(
    paths(list_groups, get_group, list_characters, get_character),
    components(
        schemas(Event, CharacterGroup, Character),
        responses(NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Events", description = "Events and their character groups")
    )
)]
pub struct ApiDoc;

/// Standard CRUD routes plus read-only navigation into groups and characters.
pub fn router<R: CrudRepository<Event> + 'static>(service: EventService<R>) -> Router {
    let crud_routes = handlers::routes(Arc::new(service.crud().clone()));

    let nested = Router::new()
        .route("/{id}/characterGroup", get(list_groups::<R>))
        .route("/{id}/characterGroup/{group}", get(get_group::<R>))
        .route(
            "/{id}/characterGroup/{group}/character",
            get(list_characters::<R>),
        )
        .route(
            "/{id}/characterGroup/{group}/character/{character}",
            get(get_character::<R>),
        )
        .with_state(Arc::new(service));

    crud_routes.merge(nested)
}

/// List the character groups of an event
#[utoipa::path(
    get,
    path = "/{id}/characterGroup",
    tag = "Events",
    params(("id" = String, Path, description = "Event name")),
    responses(
        (status = 200, description = "Character groups in stored order", body = Vec<CharacterGroup>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_groups<R: CrudRepository<Event>>(
    State(service): State<Arc<EventService<R>>>,
    AppPath(id): AppPath<String>,
) -> CrudResult<Json<Vec<CharacterGroup>>> {
    Ok(Json(service.character_groups(&id).await?))
}

/// Get a character group by name, ignoring case
#[utoipa::path(
    get,
    path = "/{id}/characterGroup/{group}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event name"),
        ("group" = String, Path, description = "Character group name")
    ),
    responses(
        (status = 200, description = "Character group found", body = CharacterGroup),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_group<R: CrudRepository<Event>>(
    State(service): State<Arc<EventService<R>>>,
    AppPath((id, group)): AppPath<(String, String)>,
) -> CrudResult<Json<CharacterGroup>> {
    Ok(Json(service.character_group(&id, &group).await?))
}

/// List the characters of a group
#[utoipa::path(
    get,
    path = "/{id}/characterGroup/{group}/character",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event name"),
        ("group" = String, Path, description = "Character group name")
    ),
    responses(
        (status = 200, description = "Characters in stored order", body = Vec<Character>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_characters<R: CrudRepository<Event>>(
    State(service): State<Arc<EventService<R>>>,
    AppPath((id, group)): AppPath<(String, String)>,
) -> CrudResult<Json<Vec<Character>>> {
    Ok(Json(service.characters(&id, &group).await?))
}

/// Get a character of a group by name, ignoring case
#[utoipa::path(
    get,
    path = "/{id}/characterGroup/{group}/character/{character}",
    tag = "Events",
    params(
        ("id" = String, Path, description = "Event name"),
        ("group" = String, Path, description = "Character group name"),
        ("character" = String, Path, description = "Character name")
    ),
    responses(
        (status = 200, description = "Character found", body = Character),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_character<R: CrudRepository<Event>>(
    State(service): State<Arc<EventService<R>>>,
    AppPath((id, group, character)): AppPath<(String, String, String)>,
) -> CrudResult<Json<Character>> {
    Ok(Json(service.character(&id, &group, &character).await?))
}
