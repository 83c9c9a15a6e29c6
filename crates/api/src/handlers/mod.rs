//! HTTP handlers.

pub mod echo_handler;
pub mod probe_handler;
pub mod user_handler;

pub use echo_handler::echo_routes;
pub use probe_handler::{probe_routes, readiness_check};
pub use user_handler::user_routes;
