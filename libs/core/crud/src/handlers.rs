//! Generic HTTP surface for resources keyed by a string identifier.
//!
//! | Method | Path         | Operation                          |
//! |--------|--------------|------------------------------------|
//! | GET    | `/`          | list                               |
//! | POST   | `/`          | create from body (409 if present)  |
//! | POST   | `/generated` | create with a generated identifier |
//! | GET    | `/{id}`      | find (404 if absent)               |
//! | POST   | `/{id}`      | create default element for `id`    |
//! | PUT    | `/{id}`      | copy body onto stored record       |
//! | DELETE | `/{id}`      | idempotent delete                  |

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{AppJson, AppPath};
use std::sync::Arc;

use crate::error::CrudResult;
use crate::repository::CrudRepository;
use crate::resource::Resource;
use crate::service::CrudService;

pub fn router<T, R>(service: CrudService<T, R>) -> Router
where
    T: Resource<Id = String>,
    R: CrudRepository<T> + 'static,
{
    routes(Arc::new(service))
}

/// Routes over an already shared service, for domains that add their own
/// routes on the same state.
pub fn routes<T, R>(service: Arc<CrudService<T, R>>) -> Router
where
    T: Resource<Id = String>,
    R: CrudRepository<T> + 'static,
{
    Router::new()
        .route("/", get(list::<T, R>).post(create_from_body::<T, R>))
        .route("/generated", post(create_generated::<T, R>))
        .route(
            "/{id}",
            get(find_one::<T, R>)
                .post(create_with_id::<T, R>)
                .put(update::<T, R>)
                .delete(delete::<T, R>),
        )
        .with_state(service)
}

pub async fn list<T, R>(State(service): State<Arc<CrudService<T, R>>>) -> CrudResult<Json<Vec<T>>>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    Ok(Json(service.find_all().await?))
}

pub async fn create_from_body<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
    AppJson(element): AppJson<T>,
) -> CrudResult<impl IntoResponse>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    service.check_doesnt_exist(&element.id()).await?;
    let created = service.save(element).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn create_generated<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
) -> CrudResult<impl IntoResponse>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    let created = service.create_generated().await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn find_one<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
    AppPath(id): AppPath<String>,
) -> CrudResult<Json<T>>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    Ok(Json(service.get(&id).await?))
}

pub async fn create_with_id<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
    AppPath(id): AppPath<String>,
) -> CrudResult<impl IntoResponse>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    service.check_doesnt_exist(&id).await?;
    let created = service.create(id).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
    AppPath(id): AppPath<String>,
    AppJson(element): AppJson<T>,
) -> CrudResult<impl IntoResponse>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    let updated = service.update(&id, element).await?;
    Ok((StatusCode::ACCEPTED, Json(updated)))
}

pub async fn delete<T, R>(
    State(service): State<Arc<CrudService<T, R>>>,
    AppPath(id): AppPath<String>,
) -> CrudResult<StatusCode>
where
    T: Resource<Id = String>,
    R: CrudRepository<T>,
{
    service.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
