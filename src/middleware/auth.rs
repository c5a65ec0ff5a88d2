// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity gate middleware.

use crate::error::AppError;
use crate::services::identity::{IdentityClaims, IdentityError, IdentityVerifier};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user extracted from a verified ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Token subject, stable per user and application
    pub subject: String,
    pub name: String,
    pub email: String,
}

impl From<IdentityClaims> for AuthUser {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            subject: claims.sub,
            name: claims.name.unwrap_or_else(|| "User".to_string()),
            email: claims
                .preferred_username
                .or(claims.email)
                .unwrap_or_default(),
        }
    }
}

/// Middleware that requires a valid bearer ID token.
///
/// Only layered onto routes when identity settings are configured.
pub async fn require_identity(
    State(verifier): State<Arc<IdentityVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request.headers().get(header::AUTHORIZATION);

    let claims = verifier
        .verify_bearer(auth_header)
        .await
        .map_err(|err| match err {
            IdentityError::MissingToken => AppError::Unauthorized,
            IdentityError::Rejected(reason) => {
                tracing::warn!(reason = %reason, "Rejected identity token");
                AppError::InvalidToken
            }
            IdentityError::Transient(reason) => AppError::KeySetUnavailable(reason),
        })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
