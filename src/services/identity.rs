// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! ID token verification against the tenant's published signing keys.
//!
//! Keys are fetched from `{authority}/{tenant}/discovery/v2.0/keys`, cached
//! for the `max-age` the identity provider advertises, and refetched at most
//! `jwks_requests_per_minute` times in any sliding minute.

use crate::config::IdentitySettings;
use anyhow::Context;
use axum::http::HeaderValue;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::{Mutex, RwLock};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
const CLOCK_SKEW_SECS: u64 = 60;

/// Claims read from a verified ID token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    pub iss: String,
    pub exp: usize,
    pub iat: Option<usize>,
    pub nbf: Option<usize>,
    pub name: Option<String>,
    pub preferred_username: Option<String>,
    pub email: Option<String>,
}

/// Identity verification error categories.
#[derive(Debug, Clone)]
pub enum IdentityError {
    /// No bearer token was presented.
    MissingToken,
    /// The token is malformed, badly signed, expired or issued for someone else.
    Rejected(String),
    /// The key set could not be fetched (network failure or rate limit).
    Transient(String),
}

#[derive(Clone)]
enum VerifierMode {
    Remote,
    StaticKey {
        kid: String,
        decoding_key: Arc<DecodingKey>,
    },
}

#[derive(Clone)]
struct JwksCacheEntry {
    keys_by_kid: HashMap<String, Arc<DecodingKey>>,
    expires_at: Instant,
}

/// Sliding-window record of recent key set fetches.
#[derive(Debug)]
struct FetchHistory {
    recent: VecDeque<Instant>,
    limit: usize,
}

impl FetchHistory {
    fn new(limit: u32) -> Self {
        Self {
            recent: VecDeque::new(),
            limit: limit.max(1) as usize,
        }
    }

    /// Record a fetch at `now` unless the window is already full.
    fn try_acquire(&mut self, now: Instant) -> bool {
        while self
            .recent
            .front()
            .is_some_and(|at| now.duration_since(*at) >= RATE_LIMIT_WINDOW)
        {
            self.recent.pop_front();
        }

        if self.recent.len() >= self.limit {
            return false;
        }

        self.recent.push_back(now);
        true
    }
}

/// Verifier for bearer ID tokens issued by the configured tenant.
pub struct IdentityVerifier {
    http_client: reqwest::Client,
    expected_audience: String,
    expected_issuer: String,
    jwks_uri: String,
    mode: VerifierMode,
    jwks_cache: RwLock<Option<JwksCacheEntry>>,
    refresh_lock: Mutex<FetchHistory>,
}

impl IdentityVerifier {
    /// Create a production verifier that fetches and caches the tenant's keys.
    pub fn new(settings: &IdentitySettings) -> anyhow::Result<Self> {
        let verifier = Self::with_mode(settings, VerifierMode::Remote)?;

        tracing::info!(
            issuer = %verifier.expected_issuer,
            audience = %verifier.expected_audience,
            jwks_uri = %verifier.jwks_uri,
            "Initialized identity verifier"
        );

        Ok(verifier)
    }

    /// Create a verifier with a static RSA public key.
    ///
    /// This is intended for deterministic local/integration tests.
    pub fn new_with_static_key(
        settings: &IdentitySettings,
        kid: impl Into<String>,
        decoding_key: DecodingKey,
    ) -> anyhow::Result<Self> {
        let kid = kid.into();
        if kid.trim().is_empty() {
            anyhow::bail!("static key kid must not be empty");
        }

        Self::with_mode(
            settings,
            VerifierMode::StaticKey {
                kid,
                decoding_key: Arc::new(decoding_key),
            },
        )
    }

    fn with_mode(settings: &IdentitySettings, mode: VerifierMode) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building identity HTTP client")?;

        Ok(Self {
            http_client,
            expected_audience: settings.client_id.clone(),
            expected_issuer: settings.issuer(),
            jwks_uri: settings.jwks_uri(),
            mode,
            jwks_cache: RwLock::new(None),
            refresh_lock: Mutex::new(FetchHistory::new(settings.jwks_requests_per_minute)),
        })
    }

    /// Verify a bearer token from an Authorization header.
    pub async fn verify_bearer(
        &self,
        auth_header: Option<&HeaderValue>,
    ) -> Result<IdentityClaims, IdentityError> {
        let token = extract_bearer_token(auth_header)?;

        let header = decode_header(token)
            .map_err(|e| IdentityError::Rejected(format!("invalid JWT header: {e}")))?;

        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::Rejected(format!(
                "unexpected JWT alg: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityError::Rejected("missing JWT kid".to_string()))?;

        let decoding_key = self.decoding_key_for_kid(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.set_issuer(&[self.expected_issuer.as_str()]);
        validation.set_audience(&[self.expected_audience.as_str()]);
        validation.validate_nbf = true;
        validation.leeway = CLOCK_SKEW_SECS;

        let token_data = decode::<IdentityClaims>(token, decoding_key.as_ref(), &validation)
            .map_err(|e| IdentityError::Rejected(format!("JWT validation failed: {e}")))?;

        let claims = token_data.claims;
        validate_iat(claims.iat)?;

        tracing::debug!(
            subject = %claims.sub,
            issuer = %claims.iss,
            exp = claims.exp,
            "Identity token verified"
        );

        Ok(claims)
    }

    async fn decoding_key_for_kid(&self, kid: &str) -> Result<Arc<DecodingKey>, IdentityError> {
        match &self.mode {
            VerifierMode::StaticKey {
                kid: static_kid,
                decoding_key,
            } => {
                if kid == static_kid {
                    return Ok(decoding_key.clone());
                }

                return Err(IdentityError::Rejected(format!(
                    "unknown JWT kid for static verifier: {kid}"
                )));
            }
            VerifierMode::Remote => {}
        }

        if let Some(key) = self.lookup_cached_key(kid).await {
            return Ok(key);
        }

        for force_refresh in [false, true] {
            self.refresh_jwks(force_refresh).await?;
            if let Some(key) = self.lookup_cached_key(kid).await {
                return Ok(key);
            }
        }

        Err(IdentityError::Rejected(format!(
            "JWT kid not found in JWKS after refresh: {kid}"
        )))
    }

    async fn lookup_cached_key(&self, kid: &str) -> Option<Arc<DecodingKey>> {
        let cache = self.jwks_cache.read().await;
        let now = Instant::now();
        cache
            .as_ref()
            .filter(|entry| entry.expires_at > now)
            .and_then(|entry| entry.keys_by_kid.get(kid))
            .cloned()
    }

    async fn refresh_jwks(&self, force_refresh: bool) -> Result<(), IdentityError> {
        let mut history = self.refresh_lock.lock().await;

        if !force_refresh {
            let cache = self.jwks_cache.read().await;
            if cache
                .as_ref()
                .is_some_and(|entry| entry.expires_at > Instant::now())
            {
                return Ok(());
            }
        }

        if !history.try_acquire(Instant::now()) {
            tracing::warn!(jwks_uri = %self.jwks_uri, "JWKS fetch rate limit reached");
            return Err(IdentityError::Transient(
                "JWKS fetch rate limit exceeded".to_string(),
            ));
        }

        tracing::debug!(jwks_uri = %self.jwks_uri, "Refreshing JWKS cache");

        let response = self
            .http_client
            .get(&self.jwks_uri)
            .send()
            .await
            .map_err(|e| IdentityError::Transient(format!("JWKS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(IdentityError::Transient(format!(
                "JWKS request returned status {}",
                response.status()
            )));
        }

        let ttl = cache_ttl_from_headers(response.headers(), DEFAULT_CACHE_TTL);

        let jwks: Jwks = response
            .json()
            .await
            .map_err(|e| IdentityError::Transient(format!("invalid JWKS JSON: {e}")))?;

        let keys_by_kid = usable_keys(jwks);

        if keys_by_kid.is_empty() {
            return Err(IdentityError::Transient(
                "JWKS response did not include any usable RSA keys".to_string(),
            ));
        }

        let count = keys_by_kid.len();
        *self.jwks_cache.write().await = Some(JwksCacheEntry {
            keys_by_kid,
            expires_at: Instant::now() + ttl,
        });

        tracing::debug!(keys = count, ttl_secs = ttl.as_secs(), "JWKS cache refreshed");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct Jwks {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    #[serde(default)]
    kid: String,
    kty: String,
    alg: Option<String>,
    #[serde(default)]
    n: String,
    #[serde(default)]
    e: String,
    #[serde(rename = "use")]
    use_: Option<String>,
}

/// RS256 signing keys from a key set, by `kid`.
fn usable_keys(jwks: Jwks) -> HashMap<String, Arc<DecodingKey>> {
    let mut keys_by_kid = HashMap::new();

    for jwk in jwks.keys {
        if jwk.kty != "RSA" || jwk.kid.trim().is_empty() {
            continue;
        }

        if jwk.alg.as_deref().is_some_and(|alg| alg != "RS256") {
            continue;
        }

        if jwk.use_.as_deref().is_some_and(|use_| use_ != "sig") {
            continue;
        }

        match DecodingKey::from_rsa_components(&jwk.n, &jwk.e) {
            Ok(key) => {
                keys_by_kid.insert(jwk.kid, Arc::new(key));
            }
            Err(e) => {
                tracing::warn!(error = %e, kid = %jwk.kid, "Skipping invalid RSA JWKS key");
            }
        }
    }

    keys_by_kid
}

fn extract_bearer_token(auth_header: Option<&HeaderValue>) -> Result<&str, IdentityError> {
    let value = auth_header
        .ok_or(IdentityError::MissingToken)?
        .to_str()
        .map_err(|_| IdentityError::Rejected("invalid Authorization header".to_string()))?;

    let token = value.strip_prefix("Bearer ").ok_or_else(|| {
        IdentityError::Rejected("Authorization header must be Bearer token".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(IdentityError::MissingToken);
    }

    Ok(token)
}

/// `iat` is optional; when present it must not be in the future.
fn validate_iat(iat: Option<usize>) -> Result<(), IdentityError> {
    let Some(iat) = iat else {
        return Ok(());
    };

    if iat as u64 > now_unix_secs() + CLOCK_SKEW_SECS {
        return Err(IdentityError::Rejected(
            "iat claim is in the future".to_string(),
        ));
    }

    Ok(())
}

fn cache_ttl_from_headers(headers: &reqwest::header::HeaderMap, fallback: Duration) -> Duration {
    headers
        .get(CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_cache_control_max_age)
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}

fn parse_cache_control_max_age(value: &str) -> Option<u64> {
    value
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|raw| raw.trim_matches('"').parse::<u64>().ok())
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
