//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Message returned when a creation payload lacks `name` or `email`
pub const MISSING_REQUIRED_FIELDS: &str = "Name and email are required";

// =============================================================================
// Probes
// =============================================================================

/// Literal reported by the liveness probe
pub const STATUS_HEALTHY: &str = "healthy";

/// Greeting returned by the root endpoint
pub const ROOT_MESSAGE: &str = "Hello, world!";
