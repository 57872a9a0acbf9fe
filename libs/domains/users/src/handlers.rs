use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AppJson, AppPath, JwtClaims, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, NotImplementedResponse,
        UnauthorizedResponse,
    },
};
use crud::CrudRepository;
use domain_roles::Role;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, User, UserResponse};
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        register,
        create_generated,
        get_user,
        update_user,
        delete_user,
        list_roles,
        get_role,
        add_role,
    ),
    components(
        schemas(User, UserResponse, Role),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            ForbiddenResponse,
            UnauthorizedResponse,
            NotImplementedResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "User accounts and their roles")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the login endpoint
#[derive(OpenApi)]
#[openapi(
    paths(login),
    components(
        schemas(LoginRequest, LoginResponse),
        responses(UnauthorizedResponse, BadRequestValidationResponse)
    ),
    tags(
        (name = "Auth", description = "Access token issuing")
    )
)]
pub struct AuthApiDoc;

type SharedService<R, RR> = Arc<UserService<R, RR>>;

/// Routes reachable without a token: registration.
pub fn public_router<R, RR>(service: SharedService<R, RR>) -> Router
where
    R: CrudRepository<User> + 'static,
    RR: CrudRepository<Role> + 'static,
{
    Router::new()
        .route("/", post(register::<R, RR>))
        .with_state(service)
}

/// Routes that expect [`JwtClaims`] from the auth middleware.
pub fn router<R, RR>(service: SharedService<R, RR>) -> Router
where
    R: CrudRepository<User> + 'static,
    RR: CrudRepository<Role> + 'static,
{
    Router::new()
        .route("/", get(list_users::<R, RR>))
        .route("/generated", post(create_generated::<R, RR>))
        .route(
            "/{id}",
            get(get_user::<R, RR>)
                .put(update_user::<R, RR>)
                .delete(delete_user::<R, RR>),
        )
        .route("/{id}/role", get(list_roles::<R, RR>))
        .route(
            "/{id}/role/{role}",
            get(get_role::<R, RR>).post(add_role::<R, RR>),
        )
        .with_state(service)
}

/// `POST /login`
pub fn auth_router<R, RR>(service: SharedService<R, RR>) -> Router
where
    R: CrudRepository<User> + 'static,
    RR: CrudRepository<Role> + 'static,
{
    Router::new()
        .route("/login", post(login::<R, RR>))
        .with_state(service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    responses(
        (status = 200, description = "Every registered user", body = Vec<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    AppJson(user): AppJson<User>,
) -> UserResult<impl IntoResponse> {
    let created = service.register(user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Usernames are chosen by their owners, so generation is unsupported
#[utoipa::path(
    post,
    path = "/generated",
    tag = "Users",
    responses(
        (status = 501, response = NotImplementedResponse)
    )
)]
async fn create_generated<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
) -> UserResult<impl IntoResponse> {
    let created = service.crud().create_generated().await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    AppPath(id): AppPath<String>,
) -> UserResult<Json<UserResponse>> {
    Ok(Json(service.get(&id).await?.into()))
}

/// Overwrite the caller's own profile
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Username")),
    request_body = User,
    responses(
        (status = 202, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    claims: JwtClaims,
    AppPath(id): AppPath<String>,
    AppJson(user): AppJson<User>,
) -> UserResult<impl IntoResponse> {
    let updated = service.update(&claims, &id, user).await?;
    Ok((StatusCode::ACCEPTED, Json(UserResponse::from(updated))))
}

/// Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Username")),
    responses(
        (status = 204, description = "User deleted or already absent"),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    claims: JwtClaims,
    AppPath(id): AppPath<String>,
) -> UserResult<StatusCode> {
    service.delete(&claims, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Roles held by a user
#[utoipa::path(
    get,
    path = "/{id}/role",
    tag = "Users",
    params(("id" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "Roles held", body = Vec<Role>),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_roles<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    AppPath(id): AppPath<String>,
) -> UserResult<Json<Vec<Role>>> {
    Ok(Json(service.roles(&id).await?))
}

/// One role held by a user, matched exactly by name
#[utoipa::path(
    get,
    path = "/{id}/role/{role}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Username"),
        ("role" = String, Path, description = "Role name")
    ),
    responses(
        (status = 200, description = "Role held", body = Role),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_role<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    AppPath((id, role)): AppPath<(String, String)>,
) -> UserResult<Json<Role>> {
    Ok(Json(service.role(&id, &role).await?))
}

/// Grant an existing role to a user
#[utoipa::path(
    post,
    path = "/{id}/role/{role}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "Username"),
        ("role" = String, Path, description = "Role name")
    ),
    responses(
        (status = 202, description = "Role granted", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_role<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    AppPath((id, role)): AppPath<(String, String)>,
) -> UserResult<impl IntoResponse> {
    let user = service.add_role(&id, &role).await?;
    Ok((StatusCode::ACCEPTED, Json(UserResponse::from(user))))
}

/// Exchange credentials for an access token
///
/// The token is returned in the body and as an `Authorization: Bearer` header.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse,
            headers(("authorization" = String, description = "Bearer access token"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn login<R: CrudRepository<User>, RR: CrudRepository<Role>>(
    State(service): State<SharedService<R, RR>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> UserResult<impl IntoResponse> {
    let response = service.login(&request).await?;

    let bearer = HeaderValue::from_str(&format!("Bearer {}", response.access_token))
        .map_err(|e| UserError::Token(e.to_string()))?;

    Ok(([(header::AUTHORIZATION, bearer)], Json(response)))
}
