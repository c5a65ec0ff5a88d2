// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod me;
pub mod videos;

use crate::error::AppError;
use crate::middleware::cors::{enforce_origin, OriginPolicy};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

const APP_NAME: &str = "aurevo";

#[derive(Serialize)]
pub struct LivenessResponse {
    pub ok: bool,
}

async fn healthz() -> Json<LivenessResponse> {
    Json(LivenessResponse { ok: true })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
    pub app: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        time: format_utc_rfc3339(chrono::Utc::now()),
        app: APP_NAME.to_string(),
        build_id,
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub has_auth: bool,
}

/// Whether sign-in is configured on this server.
async fn auth_status(State(state): State<Arc<AppState>>) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        has_auth: state.auth_enabled(),
    })
}

/// Handler for routes that need sign-in when none is configured.
async fn auth_disabled() -> AppError {
    AppError::AuthDisabled
}

/// Front end entry point for API paths hit with an unsupported method.
async fn spa_index(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let index = ServeFile::new(state.config.public_dir.join("index.html"));
    match index.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let origin_policy = Arc::new(OriginPolicy::new(state.config.allowed_origins.clone()));
    let cors = origin_policy.cors_layer();

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/health", get(health_check))
        .route("/auth/status", get(auth_status))
        .merge(videos::public_routes());

    // Identity-dependent routes: gated when sign-in is configured, guest/disabled otherwise
    let identity_routes = match &state.identity {
        Some(verifier) => videos::authenticated_routes(verifier.clone())
            .merge(me::authenticated_routes(verifier.clone())),
        None => videos::disabled_routes().merge(me::guest_routes()),
    };

    // Static front end with SPA fallback to index.html
    let public_dir = &state.config.public_dir;
    let static_files = ServeDir::new(public_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .merge(public_routes)
        .merge(identity_routes)
        .method_not_allowed_fallback(spa_index)
        .fallback_service(static_files)
        .layer(cors)
        .layer(middleware::from_fn_with_state(origin_policy, enforce_origin))
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
