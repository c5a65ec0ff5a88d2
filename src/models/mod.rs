// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod user;
pub mod video;

pub use user::{Role, SetRoleRequest, UserProfile};
pub use video::{CreateVideoRequest, NewVideo, Video};
