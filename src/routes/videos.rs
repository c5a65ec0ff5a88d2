// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Video listing and publishing routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_identity, AuthUser};
use crate::models::{CreateVideoRequest, Role, Video};
use crate::services::identity::IdentityVerifier;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// Routes open to everyone.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/videos", get(list_videos))
}

/// Publishing routes behind the identity gate.
pub fn authenticated_routes(verifier: Arc<IdentityVerifier>) -> Router<Arc<AppState>> {
    Router::new().route(
        "/videos",
        post(create_video).route_layer(middleware::from_fn_with_state(verifier, require_identity)),
    )
}

/// Publishing routes when sign-in is not configured.
pub fn disabled_routes() -> Router<Arc<AppState>> {
    Router::new().route("/videos", post(super::auth_disabled))
}

/// List every video, newest first.
async fn list_videos(State(state): State<Arc<AppState>>) -> Json<Vec<Video>> {
    Json(state.videos.list().await)
}

#[derive(Debug, Serialize)]
pub struct CreateVideoResponse {
    pub ok: bool,
    pub id: String,
}

/// Publish a video. Creators only.
async fn create_video(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<CreateVideoRequest>, JsonRejection>,
) -> Result<Json<CreateVideoResponse>> {
    let profile = state.users.ensure(&user);
    if profile.role != Role::Creator {
        return Err(AppError::Forbidden("Creators only".to_string()));
    }

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let new_video = request
        .validate()
        .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let video = state.videos.create(new_video).await;

    tracing::info!(
        subject = %user.subject,
        video_id = %video.id,
        title = %video.title,
        "Video published"
    );

    Ok(Json(CreateVideoResponse {
        ok: true,
        id: video.id,
    }))
}
