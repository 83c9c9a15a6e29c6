//! Route configuration.

use axum::{routing::get, Router};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{echo_routes, probe_routes, readiness_check, user_routes};
use crate::openapi::api_doc;
use crate::state::AppState;

/// Router for the persisted variant.
pub fn create_router(state: AppState) -> Router {
    let doc = api_doc(&state.config.app_name);

    // Probes (no state needed)
    probe_routes::<AppState>()
        .route("/ready", get(readiness_check))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc))
        // CRUD over stored records
        .nest("/api/users", user_routes())
        .with_state(state)
}

/// Router for the ephemeral variant: validation and echo only.
pub fn create_ephemeral_router() -> Router {
    probe_routes::<()>().merge(echo_routes::<()>())
}
