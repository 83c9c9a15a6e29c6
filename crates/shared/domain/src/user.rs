//! User record, its validation and its serialized form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::constants::MISSING_REQUIRED_FIELDS;
use crate::error::{DomainError, DomainResult};

/// A typed user record, ready to store.
///
/// It carries no identity; the persistence layer wraps it in a [`StoredUser`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Display name
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))
    )]
    #[cfg_attr(feature = "openapi", schema(example = "Ada"))]
    pub name: String,
    /// Email address
    #[cfg_attr(feature = "validation", validate(email(message = "Enter a valid email address")))]
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: String,
    /// Optional age; omitted or null means unset
    pub age: Option<i64>,
}

impl User {
    /// Create a record from already-checked parts
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: Option<i64>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
        }
    }
}

/// A record as submitted, before any storage typing.
///
/// `name` and `email` are known to be present and non-null. Every value is
/// kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserInput {
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "Ada"))]
    pub name: Value,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ada@example.com"))]
    pub email: Value,
    /// Null when not sent
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub age: Value,
}

impl UserInput {
    /// Name as it reads inside a message (strings lose their quotes)
    pub fn display_name(&self) -> String {
        match &self.name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// Check a loosely typed JSON object for the required fields.
///
/// Only presence is checked: `name` and `email` must exist and be non-null.
/// Values are not typed here; storing a record goes through
/// `User::try_from`, which does that.
pub fn validate_and_create(input: &Map<String, Value>) -> DomainResult<UserInput> {
    let present = |key: &str| input.get(key).filter(|v| !v.is_null()).cloned();

    match (present("name"), present("email")) {
        (Some(name), Some(email)) => Ok(UserInput {
            name,
            email,
            age: input.get("age").cloned().unwrap_or(Value::Null),
        }),
        _ => Err(DomainError::validation(MISSING_REQUIRED_FIELDS)),
    }
}

/// Project a submitted record onto its public fields.
pub fn serialize(user: &UserInput) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("name".to_string(), user.name.clone());
    out.insert("email".to_string(), user.email.clone());
    out.insert("age".to_string(), user.age.clone());
    out
}

impl TryFrom<UserInput> for User {
    type Error = DomainError;

    /// Coerce the submitted values the way a form field would: numbers are
    /// accepted as text, and integral numbers or numeric strings as age.
    fn try_from(input: UserInput) -> DomainResult<Self> {
        Ok(User {
            name: text_field("name", input.name)?,
            email: text_field("email", input.email)?,
            age: integer_field(input.age)?,
        })
    }
}

fn text_field(key: &str, value: Value) -> DomainResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(DomainError::validation(format!("{} must be a string", key))),
    }
}

fn integer_field(value: Value) -> DomainResult<Option<i64>> {
    let age = match value {
        Value::Null => return Ok(None),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    age.map(Some)
        .ok_or_else(|| DomainError::validation("age must be an integer"))
}

/// A user record as returned by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredUser {
    /// Record that results from applying a partial update
    pub fn merged(&self, changes: UserChanges) -> User {
        User {
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            email: changes.email.unwrap_or_else(|| self.email.clone()),
            age: changes.age.unwrap_or(self.age),
        }
    }
}

/// Partial update of a stored record.
///
/// `age` distinguishes "not sent" (`None`) from "sent as null" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserChanges {
    /// New display name
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))
    )]
    #[serde(default, deserialize_with = "reject_null")]
    #[cfg_attr(feature = "openapi", schema(example = "Ada Lovelace"))]
    pub name: Option<String>,
    /// New email address
    #[cfg_attr(feature = "validation", validate(email(message = "Enter a valid email address")))]
    #[serde(default, deserialize_with = "reject_null")]
    #[cfg_attr(feature = "openapi", schema(example = "ada@example.com"))]
    pub email: Option<String>,
    /// New age, or null to clear it
    #[serde(default, deserialize_with = "deserialize_some")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub age: Option<Option<i64>>,
}

fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn reject_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom("This field may not be null"))
}

/// Serialized stored user (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Server-assigned identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Age, null when unset
    pub age: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredUser> for UserResponse {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
