// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aurevo API Server
//!
//! Serves the video list, the Creator publishing endpoints and the static
//! front end.

use aurevo::{config::Config, services::IdentityVerifier, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting aurevo");

    // Sign-in is either wired in for the life of the process or not at all
    let identity = match config.identity_settings() {
        Some(settings) => Some(Arc::new(IdentityVerifier::new(&settings)?)),
        None => {
            tracing::warn!(
                client_id_set = config.client_id.is_some(),
                tenant_id_set = config.tenant_id.is_some(),
                "CLIENT_ID and TENANT_ID must both be set for token validation; sign-in disabled"
            );
            None
        }
    };

    if config.allowed_origins.is_empty() {
        tracing::info!("ALLOWED_ORIGINS empty; accepting requests from any origin");
    }

    tracing::info!(path = %config.public_dir.display(), "Serving static front end");

    let addr = format!("0.0.0.0:{}", config.port);
    let state = Arc::new(AppState::new(config, identity));

    // Build router
    let app = aurevo::routes::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "aurevo listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aurevo=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
