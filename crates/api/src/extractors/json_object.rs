//! Raw JSON object extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde_json::{Map, Value};

use common::AppError;
use domain::MISSING_REQUIRED_FIELDS;

/// Request body parsed as an untyped JSON object.
///
/// Field presence is left to `domain::validate_and_create`; a body that is
/// not an object at all is reported the same way as one missing fields.
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
    Json<Value>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonObject(map)),
            _ => Err(AppError::validation(MISSING_REQUIRED_FIELDS)),
        }
    }
}
