//! User API Library
//!
//! HTTP adapters over the shared user record. The persisted variant stores
//! records through `user-service`; the ephemeral variant only validates and
//! echoes them.

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use common::AppConfig;

use crate::routes::{create_ephemeral_router, create_router};
use crate::state::AppState;

/// Which HTTP surface to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// CRUD backed by the database
    Persisted,
    /// Validate-and-echo, nothing is stored
    Ephemeral,
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(
    config: AppConfig,
    variant: Variant,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.uses_default_secret() && !config.debug {
        warn!("SECRET_KEY is not set; using the development default");
    }

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app_name = config.app_name.clone();

    // Build router
    let app = match variant {
        Variant::Persisted => create_router(AppState::connect(config).await?),
        Variant::Ephemeral => create_ephemeral_router(),
    }
    .layer(TraceLayer::new_for_http());

    info!(variant = ?variant, "{} listening on {}", app_name, addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
