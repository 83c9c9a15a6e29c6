//! Domain layer - the user record and its rules.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Both HTTP variants and the persistence layer build on these types.

pub mod constants;
pub mod error;
pub mod health;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use health::{health_status, HealthStatus};
pub use user::{
    serialize, validate_and_create, StoredUser, User, UserChanges, UserInput, UserResponse,
};
