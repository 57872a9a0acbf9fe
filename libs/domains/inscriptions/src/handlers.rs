use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AppJson, AppPath,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, NotImplementedResponse,
    },
};
use crud::{CrudRepository, CrudResult};
use domain_events::Event;
use domain_users::User;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{EventInscription, EventInscriptionId};
use crate::repository::InscriptionRepository;
use crate::service::InscriptionService;

/// OpenAPI documentation for the Event Inscriptions API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_inscriptions,
        register,
        create_generated,
        list_by_event,
        get_inscription,
        update_inscription,
        delete_inscription,
        assign_character,
    ),
    components(
        schemas(EventInscription, EventInscriptionId),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            NotImplementedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "EventInscriptions", description = "Users signed up to events")
    )
)]
pub struct ApiDoc;

type SharedService<R, ER, UR> = Arc<InscriptionService<R, ER, UR>>;

pub fn router<R, ER, UR>(service: InscriptionService<R, ER, UR>) -> Router
where
    R: InscriptionRepository + 'static,
    ER: CrudRepository<Event> + 'static,
    UR: CrudRepository<User> + 'static,
{
    Router::new()
        .route(
            "/",
            get(list_inscriptions::<R, ER, UR>).post(register::<R, ER, UR>),
        )
        .route("/generated", post(create_generated::<R, ER, UR>))
        .route("/{event}", get(list_by_event::<R, ER, UR>))
        .route(
            "/{event}/{user}",
            get(get_inscription::<R, ER, UR>)
                .put(update_inscription::<R, ER, UR>)
                .delete(delete_inscription::<R, ER, UR>),
        )
        .route(
            "/{event}/{user}/character/{character}",
            put(assign_character::<R, ER, UR>),
        )
        .with_state(Arc::new(service))
}

/// List all inscriptions
#[utoipa::path(
    get,
    path = "",
    tag = "EventInscriptions",
    responses(
        (status = 200, description = "Every inscription", body = Vec<EventInscription>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_inscriptions<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
) -> CrudResult<Json<Vec<EventInscription>>>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    Ok(Json(service.find_all().await?))
}

/// Sign a user up for an event
#[utoipa::path(
    post,
    path = "",
    tag = "EventInscriptions",
    request_body = EventInscription,
    responses(
        (status = 201, description = "Inscription created", body = EventInscription),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppJson(inscription): AppJson<EventInscription>,
) -> CrudResult<impl IntoResponse>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    let created = service.register(inscription).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Inscriptions are keyed by event and user, so generation is unsupported
#[utoipa::path(
    post,
    path = "/generated",
    tag = "EventInscriptions",
    responses(
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn create_generated<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
) -> CrudResult<impl IntoResponse>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    let created = service.crud().create_generated().await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Inscriptions of one event
#[utoipa::path(
    get,
    path = "/{event}",
    tag = "EventInscriptions",
    params(("event" = String, Path, description = "Event name")),
    responses(
        (status = 200, description = "Inscriptions of the event", body = Vec<EventInscription>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_event<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppPath(event): AppPath<String>,
) -> CrudResult<Json<Vec<EventInscription>>>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    Ok(Json(service.find_by_event(&event).await?))
}

/// Get one inscription
#[utoipa::path(
    get,
    path = "/{event}/{user}",
    tag = "EventInscriptions",
    params(
        ("event" = String, Path, description = "Event name"),
        ("user" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "Inscription found", body = EventInscription),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_inscription<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppPath((event, user)): AppPath<(String, String)>,
) -> CrudResult<Json<EventInscription>>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    Ok(Json(service.get(&event, &user).await?))
}

/// Overwrite an inscription, keeping its key
#[utoipa::path(
    put,
    path = "/{event}/{user}",
    tag = "EventInscriptions",
    params(
        ("event" = String, Path, description = "Event name"),
        ("user" = String, Path, description = "Username")
    ),
    request_body = EventInscription,
    responses(
        (status = 202, description = "Inscription updated", body = EventInscription),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_inscription<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppPath((event, user)): AppPath<(String, String)>,
    AppJson(inscription): AppJson<EventInscription>,
) -> CrudResult<impl IntoResponse>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    let updated = service.update(&event, &user, inscription).await?;
    Ok((StatusCode::ACCEPTED, Json(updated)))
}

/// Remove an inscription
#[utoipa::path(
    delete,
    path = "/{event}/{user}",
    tag = "EventInscriptions",
    params(
        ("event" = String, Path, description = "Event name"),
        ("user" = String, Path, description = "Username")
    ),
    responses(
        (status = 204, description = "Inscription deleted or already absent"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_inscription<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppPath((event, user)): AppPath<(String, String)>,
) -> CrudResult<StatusCode>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    service.delete(&event, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign a character of the event to the inscribed user
#[utoipa::path(
    put,
    path = "/{event}/{user}/character/{character}",
    tag = "EventInscriptions",
    params(
        ("event" = String, Path, description = "Event name"),
        ("user" = String, Path, description = "Username"),
        ("character" = String, Path, description = "Character name, matched ignoring case")
    ),
    responses(
        (status = 202, description = "Character assigned", body = EventInscription),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn assign_character<R, ER, UR>(
    State(service): State<SharedService<R, ER, UR>>,
    AppPath((event, user, character)): AppPath<(String, String, String)>,
) -> CrudResult<impl IntoResponse>
where
    R: InscriptionRepository,
    ER: CrudRepository<Event>,
    UR: CrudRepository<User>,
{
    let assigned = service.assign_character(&event, &user, &character).await?;
    Ok((StatusCode::ACCEPTED, Json(assigned)))
}
