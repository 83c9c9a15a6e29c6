//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::echo_handler::CreatedUserResponse;
use crate::handlers::probe_handler::{MessageResponse, ReadinessResponse};
use domain::{HealthStatus, User, UserChanges, UserInput, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::probe_handler::root,
        crate::handlers::probe_handler::health_check,
        crate::handlers::probe_handler::readiness_check,
        crate::handlers::echo_handler::create_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::replace_user,
        crate::handlers::user_handler::patch_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            MessageResponse,
            HealthStatus,
            ReadinessResponse,
            CreatedUserResponse,
            User,
            UserInput,
            UserChanges,
            UserResponse,
        )
    ),
    tags(
        (name = "Probes", description = "Greeting, liveness and readiness"),
        (name = "Ephemeral", description = "Validate-and-echo endpoints, nothing is stored"),
        (name = "Users", description = "Persisted user records"),
    )
)]
pub struct ApiDoc;

/// OpenAPI document titled after the running application.
pub fn api_doc(app_name: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = app_name.to_string();
    doc
}
