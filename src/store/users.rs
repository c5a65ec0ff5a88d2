// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subject to profile directory.

use crate::middleware::auth::AuthUser;
use crate::models::{Role, UserProfile};
use dashmap::DashMap;

/// Locally assigned roles, keyed by verified token subject.
#[derive(Default)]
pub struct UserDirectory {
    users: DashMap<String, UserProfile>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored profile, creating a Consumer entry on first sight.
    pub fn ensure(&self, user: &AuthUser) -> UserProfile {
        self.users
            .entry(user.subject.clone())
            .or_insert_with(|| {
                tracing::info!(subject = %user.subject, "Registering new user");
                default_profile(user)
            })
            .value()
            .clone()
    }

    pub fn get(&self, subject: &str) -> Option<UserProfile> {
        self.users.get(subject).map(|entry| entry.value().clone())
    }

    /// Overwrite the role, keeping the stored name and email.
    pub fn set_role(&self, user: &AuthUser, role: Role) -> UserProfile {
        let mut entry = self
            .users
            .entry(user.subject.clone())
            .or_insert_with(|| default_profile(user));
        entry.role = role;
        entry.value().clone()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn default_profile(user: &AuthUser) -> UserProfile {
    UserProfile {
        name: user.name.clone(),
        email: user.email.clone(),
        role: Role::default(),
    }
}
