// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Aurevo: a small video listing backend
//!
//! This crate serves an in-memory list of videos over HTTP, lets signed-in
//! Creators publish new ones, and hosts the static front end.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::IdentityVerifier;
use std::sync::Arc;
use store::{UserDirectory, VideoStore};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub videos: VideoStore,
    pub users: UserDirectory,
    /// Present only when sign-in is configured; decided once at startup.
    pub identity: Option<Arc<IdentityVerifier>>,
}

impl AppState {
    /// Fresh state with a seeded video list and empty user directory.
    pub fn new(config: Config, identity: Option<Arc<IdentityVerifier>>) -> Self {
        Self {
            config,
            videos: VideoStore::new(),
            users: UserDirectory::new(),
            identity,
        }
    }

    pub fn auth_enabled(&self) -> bool {
        self.identity.is_some()
    }
}
