use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(create_user, get_user_by_user_name),
    components(schemas(CreateUser, UserResponse)),
    tags(
        (name = "Users", description = "User management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_user))
        .route("/{user_name}", get(get_user_by_user_name))
        .with_state(shared_service)
}

/// Create a new user
///
/// POST /user
#[utoipa::path(
    post,
    path = "",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully"),
        (status = 400, description = "Both username and email are blank"),
        (status = 409, description = "Username or email already exists"),
        (status = 500, description = "Store failure")
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Json(input): Json<CreateUser>,
) -> UserResult<impl IntoResponse> {
    service.create_user(input).await?;
    Ok(StatusCode::CREATED)
}

/// Get a user by username
///
/// GET /user/:userName
#[utoipa::path(
    get,
    path = "/{userName}",
    tag = "Users",
    params(
        ("userName" = String, Path, description = "Username to look up")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "No user with that username"),
        (status = 500, description = "Store failure")
    )
)]
async fn get_user_by_user_name<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(user_name): Path<String>,
) -> UserResult<Json<UserResponse>> {
    let user = service.get_user_by_user_name(&user_name).await?;
    Ok(Json(user))
}
