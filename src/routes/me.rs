// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-user profile and role routes.

use crate::error::{AppError, Result};
use crate::middleware::auth::{require_identity, AuthUser};
use crate::models::{Role, SetRoleRequest, UserProfile};
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

/// Profile routes behind the identity gate.
///
/// The gate wraps each handler rather than the whole router, so methods a
/// path doesn't support fall through to the front end unauthenticated.
pub fn authenticated_routes(verifier: Arc<IdentityVerifier>) -> Router<Arc<AppState>> {
    let gate = middleware::from_fn_with_state(verifier, require_identity);
    Router::new()
        .route("/me", get(get_me).route_layer(gate.clone()))
        .route("/me/role", post(set_role).route_layer(gate))
}

/// Profile routes when sign-in is not configured.
pub fn guest_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(get_guest))
        .route("/me/role", post(super::auth_disabled))
}

/// Current user response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Get the caller's profile, registering them on first contact.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<MeResponse> {
    Json(MeResponse {
        user: state.users.ensure(&user),
    })
}

async fn get_guest() -> Json<MeResponse> {
    Json(MeResponse {
        user: UserProfile::guest(),
    })
}

#[derive(Debug, Serialize)]
pub struct SetRoleResponse {
    pub ok: bool,
    pub role: Role,
}

/// Switch the caller between Creator and Consumer.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    payload: std::result::Result<Json<SetRoleRequest>, JsonRejection>,
) -> Result<Json<SetRoleResponse>> {
    state.users.ensure(&user);

    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let role: Role = request
        .role
        .unwrap_or_default()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid role".to_string()))?;

    let profile = state.users.set_role(&user, role);

    tracing::info!(subject = %user.subject, role = %profile.role, "Role updated");

    Ok(Json(SetRoleResponse {
        ok: true,
        role: profile.role,
    }))
}
