//! Request extractors.

mod json_object;
mod validated_json;

pub use json_object::JsonObject;
pub use validated_json::ValidatedJson;

use common::AppError;
use validator::ValidationErrors;

/// Collapse validator output into a single client-facing message.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    // Get first validation error message
    let message = errors
        .field_errors()
        .values()
        .next()
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string());
    AppError::validation(message)
}
