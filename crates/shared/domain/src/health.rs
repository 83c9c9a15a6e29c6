//! Liveness probe payload.

use serde::{Deserialize, Serialize};

use crate::constants::STATUS_HEALTHY;

/// Body of the liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthStatus {
    #[cfg_attr(feature = "openapi", schema(example = "healthy"))]
    pub status: String,
}

/// Fixed liveness answer. Takes no input and cannot fail.
pub fn health_status() -> HealthStatus {
    HealthStatus {
        status: STATUS_HEALTHY.to_string(),
    }
}
