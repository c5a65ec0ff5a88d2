// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Identity verification is only enabled when both `CLIENT_ID` and
//! `TENANT_ID` are present. That decision is made once at startup.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
const DEFAULT_JWKS_REQUESTS_PER_MINUTE: u32 = 10;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Application (client) ID tokens must be issued for
    pub client_id: Option<String>,
    /// Directory (tenant) ID of the token issuer
    pub tenant_id: Option<String>,
    /// Origins allowed for cross-origin requests; empty allows all
    pub allowed_origins: Vec<String>,
    /// Root directory for the static front end
    pub public_dir: PathBuf,
    /// Identity provider base URL
    pub authority_host: String,
    /// Upper bound on key set fetches per minute
    pub jwks_requests_per_minute: u32,
}

/// Settings for the identity gate, present only when auth is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    pub client_id: String,
    pub tenant_id: String,
    pub authority_host: String,
    pub jwks_requests_per_minute: u32,
}

impl IdentitySettings {
    /// Expected `iss` claim.
    pub fn issuer(&self) -> String {
        format!("{}/{}/v2.0", self.authority_host, self.tenant_id)
    }

    /// Location of the tenant's signing key set.
    pub fn jwks_uri(&self) -> String {
        format!(
            "{}/{}/discovery/v2.0/keys",
            self.authority_host, self.tenant_id
        )
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match non_blank_var("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, default = DEFAULT_PORT, "Invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let jwks_requests_per_minute = match non_blank_var("JWKS_REQUESTS_PER_MINUTE") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "JWKS_REQUESTS_PER_MINUTE",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_JWKS_REQUESTS_PER_MINUTE,
        };

        Ok(Self {
            port,
            client_id: non_blank_var("CLIENT_ID"),
            tenant_id: non_blank_var("TENANT_ID"),
            allowed_origins: parse_origins(&env::var("ALLOWED_ORIGINS").unwrap_or_default()),
            public_dir: non_blank_var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
            authority_host: non_blank_var("AUTHORITY_HOST")
                .map(|h| h.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string()),
            jwks_requests_per_minute,
        })
    }

    /// Deterministic config for tests. Auth is enabled.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            client_id: Some("test-client-id".to_string()),
            tenant_id: Some("test-tenant-id".to_string()),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            public_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            jwks_requests_per_minute: DEFAULT_JWKS_REQUESTS_PER_MINUTE,
        }
    }

    /// Identity settings when both client and tenant IDs are configured.
    pub fn identity_settings(&self) -> Option<IdentitySettings> {
        match (&self.client_id, &self.tenant_id) {
            (Some(client_id), Some(tenant_id)) => Some(IdentitySettings {
                client_id: client_id.clone(),
                tenant_id: tenant_id.clone(),
                authority_host: self.authority_host.clone(),
                jwks_requests_per_minute: self.jwks_requests_per_minute,
            }),
            _ => None,
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split a comma-separated origin list, dropping blank entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
