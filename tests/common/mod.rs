// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use aurevo::config::Config;
use aurevo::routes::create_router;
use aurevo::services::IdentityVerifier;
use aurevo::AppState;
use axum::body::Body;
use axum::http::{header, Request, Response};
use jsonwebtoken::{encode, Algorithm, DecodingKey, EncodingKey, Header};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_KID: &str = "test-signing-key";
pub const SIGNING_KEY_PEM: &[u8] = include_bytes!("../fixtures/signing_key.pem");
pub const PUBLIC_KEY_PEM: &[u8] = include_bytes!("../fixtures/signing_key.pub.pem");
pub const UNTRUSTED_KEY_PEM: &[u8] = include_bytes!("../fixtures/untrusted_key.pem");

/// Create a test app with sign-in enabled, verifying against the fixture key.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let settings = config
        .identity_settings()
        .expect("test config enables auth");

    let decoding_key =
        DecodingKey::from_rsa_pem(PUBLIC_KEY_PEM).expect("fixture public key should parse");
    let verifier = IdentityVerifier::new_with_static_key(&settings, TEST_KID, decoding_key)
        .expect("static verifier");

    let state = Arc::new(AppState::new(config, Some(Arc::new(verifier))));
    (create_router(state.clone()), state)
}

/// Create a test app with sign-in disabled (no CLIENT_ID / TENANT_ID).
#[allow(dead_code)]
pub fn create_guest_app() -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.client_id = None;
    config.tenant_id = None;

    let state = Arc::new(AppState::new(config, None));
    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Valid ID token claims for `subject` under the test config.
#[allow(dead_code)]
pub fn valid_claims(subject: &str) -> Value {
    let config = Config::test_default();
    let settings = config.identity_settings().unwrap();
    let now = now_secs();

    json!({
        "sub": subject,
        "iss": settings.issuer(),
        "aud": settings.client_id,
        "iat": now,
        "nbf": now,
        "exp": now + 3600,
        "name": format!("User {subject}"),
        "preferred_username": format!("{subject}@contoso.test"),
    })
}

/// Sign arbitrary claims with an RS256 PEM key.
#[allow(dead_code)]
pub fn sign_claims(claims: &Value, key_pem: &[u8], kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(String::from);

    encode(
        &header,
        claims,
        &EncodingKey::from_rsa_pem(key_pem).expect("fixture private key should parse"),
    )
    .unwrap()
}

/// A valid bearer token for `subject`.
#[allow(dead_code)]
pub fn create_test_token(subject: &str) -> String {
    sign_claims(&valid_claims(subject), SIGNING_KEY_PEM, Some(TEST_KID))
}

#[allow(dead_code)]
pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("response body should be JSON")
}
