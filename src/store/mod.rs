// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory state owned by the server process.
//!
//! Nothing here is persisted; a restart reseeds the video list and
//! forgets every stored role.

pub mod users;
pub mod videos;

pub use users::UserDirectory;
pub use videos::VideoStore;
