// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key set fetching, caching and rate limiting against a local identity provider.

use aurevo::config::{Config, IdentitySettings};
use aurevo::routes::create_router;
use aurevo::services::{IdentityError, IdentityVerifier};
use aurevo::AppState;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{json_body, now_secs, sign_claims, SIGNING_KEY_PEM, TEST_KID, UNTRUSTED_KEY_PEM};

const JWKS_JSON: &str = include_str!("fixtures/jwks.json");
const TENANT: &str = "test-tenant-id";
const CLIENT: &str = "test-client-id";

/// Serve the fixture key set (or a 500) and count requests. Returns the base URL.
async fn spawn_identity_provider(hits: Arc<AtomicUsize>, healthy: bool) -> String {
    let path = format!("/{TENANT}/discovery/v2.0/keys");
    let app = Router::new().route(
        &path,
        get(move || {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                if healthy {
                    (
                        [
                            (header::CONTENT_TYPE, "application/json"),
                            (header::CACHE_CONTROL, "public, max-age=3600"),
                        ],
                        JWKS_JSON,
                    )
                        .into_response()
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn settings(authority_host: String, jwks_requests_per_minute: u32) -> IdentitySettings {
    IdentitySettings {
        client_id: CLIENT.to_string(),
        tenant_id: TENANT.to_string(),
        authority_host,
        jwks_requests_per_minute,
    }
}

fn claims(settings: &IdentitySettings, subject: &str) -> Value {
    let now = now_secs();
    json!({
        "sub": subject,
        "iss": settings.issuer(),
        "aud": settings.client_id,
        "iat": now,
        "exp": now + 600,
        "name": "Remote User",
    })
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

#[tokio::test]
async fn test_fetches_keys_once_and_caches() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits.clone(), true).await;
    let settings = settings(base, 10);
    let verifier = IdentityVerifier::new(&settings).unwrap();

    let token = sign_claims(&claims(&settings, "remote-1"), SIGNING_KEY_PEM, Some(TEST_KID));

    for _ in 0..3 {
        let verified = verifier.verify_bearer(Some(&bearer(&token))).await.unwrap();
        assert_eq!(verified.sub, "remote-1");
        assert_eq!(verified.name.as_deref(), Some("Remote User"));
    }

    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unknown_kid_forces_one_refresh() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits.clone(), true).await;
    let settings = settings(base, 10);
    let verifier = IdentityVerifier::new(&settings).unwrap();

    let token = sign_claims(
        &claims(&settings, "remote-2"),
        UNTRUSTED_KEY_PEM,
        Some("rotated-away"),
    );

    let result = verifier.verify_bearer(Some(&bearer(&token))).await;
    assert!(matches!(result, Err(IdentityError::Rejected(_))));

    // Initial fill plus one forced refresh
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_refresh_rate_limited() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits.clone(), true).await;
    let settings = settings(base, 2);
    let verifier = IdentityVerifier::new(&settings).unwrap();

    let token = sign_claims(
        &claims(&settings, "remote-3"),
        UNTRUSTED_KEY_PEM,
        Some("rotated-away"),
    );

    let first = verifier.verify_bearer(Some(&bearer(&token))).await;
    assert!(matches!(first, Err(IdentityError::Rejected(_))));

    let second = verifier.verify_bearer(Some(&bearer(&token))).await;
    assert!(matches!(second, Err(IdentityError::Transient(_))));

    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // Cached keys keep working while refreshes are throttled
    let good = sign_claims(&claims(&settings, "remote-3"), SIGNING_KEY_PEM, Some(TEST_KID));
    assert!(verifier.verify_bearer(Some(&bearer(&good))).await.is_ok());
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_provider_failure_is_transient() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits.clone(), false).await;
    let settings = settings(base, 10);
    let verifier = IdentityVerifier::new(&settings).unwrap();

    let token = sign_claims(&claims(&settings, "remote-4"), SIGNING_KEY_PEM, Some(TEST_KID));
    let result = verifier.verify_bearer(Some(&bearer(&token))).await;

    assert!(matches!(result, Err(IdentityError::Transient(_))));
}

#[tokio::test]
async fn test_gate_reports_unavailable_key_set() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits, false).await;

    let mut config = Config::test_default();
    config.authority_host = base;
    let settings = config.identity_settings().unwrap();
    let verifier = Arc::new(IdentityVerifier::new(&settings).unwrap());
    let state = Arc::new(AppState::new(config, Some(verifier)));
    let app = create_router(state.clone());

    let token = sign_claims(&claims(&settings, "remote-5"), SIGNING_KEY_PEM, Some(TEST_KID));
    let response = app
        .oneshot(common::get("/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"], "identity_unavailable");
    assert!(state.users.is_empty());
}

#[tokio::test]
async fn test_gate_accepts_remote_verified_token() {
    let hits = Arc::new(AtomicUsize::new(0));
    let base = spawn_identity_provider(hits.clone(), true).await;

    let mut config = Config::test_default();
    config.authority_host = base;
    let settings = config.identity_settings().unwrap();
    let verifier = Arc::new(IdentityVerifier::new(&settings).unwrap());
    let app = create_router(Arc::new(AppState::new(config, Some(verifier))));

    let token = sign_claims(&claims(&settings, "remote-6"), SIGNING_KEY_PEM, Some(TEST_KID));
    let response = app
        .oneshot(common::get("/me", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["name"], "Remote User");
    assert_eq!(body["user"]["role"], "Consumer");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
