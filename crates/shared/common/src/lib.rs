//! Common utilities shared across crates.
//!
//! This crate provides:
//! - Unified error handling for HTTP
//! - Configuration loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
