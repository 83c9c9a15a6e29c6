//! Persisted user handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use validator::Validate;

use common::AppResult;
use domain::{validate_and_create, User, UserChanges, UserResponse};

use crate::extractors::{validation_error, JsonObject, ValidatedJson};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/:id",
            get(get_user)
                .put(replace_user)
                .patch(patch_user)
                .delete(delete_user),
        )
}

/// Presence check shared with the ephemeral variant, then the typing and
/// format rules of the persisted store.
fn checked_user(input: &serde_json::Map<String, serde_json::Value>) -> AppResult<User> {
    let user = User::try_from(validate_and_create(input)?)?;
    user.validate().map_err(validation_error)?;
    Ok(user)
}

/// List all users, newest first
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = User,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonObject(input): JsonObject,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = checked_user(&input)?;
    let stored = state.users.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(stored))))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Replace every field of a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = User,
    responses(
        (status = 200, description = "User replaced", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn replace_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonObject(input): JsonObject,
) -> AppResult<Json<UserResponse>> {
    let user = checked_user(&input)?;
    let stored = state.users.replace_user(id, user).await?;
    Ok(Json(UserResponse::from(stored)))
}

/// Update some fields of a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserChanges,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn patch_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(changes): ValidatedJson<UserChanges>,
) -> AppResult<Json<UserResponse>> {
    let stored = state.users.patch_user(id, changes).await?;
    Ok(Json(UserResponse::from(stored)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
