//! Ephemeral user creation: validate and echo, nothing is stored.

use axum::{http::StatusCode, response::Json, routing::post, Router};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use common::AppResult;
use domain::{serialize, validate_and_create};

use crate::extractors::JsonObject;

/// Body returned by the ephemeral create endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedUserResponse {
    #[schema(example = "User Ada created!")]
    pub message: String,
    /// The submitted fields, echoed verbatim
    #[schema(value_type = domain::UserInput)]
    pub user: Map<String, Value>,
}

/// Create echo routes
pub fn echo_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/users", post(create_user))
}

/// Validate a user and echo it back
#[utoipa::path(
    post,
    path = "/users",
    tag = "Ephemeral",
    request_body = domain::UserInput,
    responses(
        (status = 201, description = "User validated", body = CreatedUserResponse),
        (status = 400, description = "Name and email are required")
    )
)]
pub async fn create_user(
    JsonObject(input): JsonObject,
) -> AppResult<(StatusCode, Json<CreatedUserResponse>)> {
    let user = validate_and_create(&input)?;
    let name = user.display_name();
    tracing::debug!(name = %name, "Echoing transient user");

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            message: format!("User {} created!", name),
            user: serialize(&user),
        }),
    ))
}
