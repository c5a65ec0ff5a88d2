// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Newest-first video list.

use crate::models::{NewVideo, Video};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::RwLock;

const SEED_VIDEO_ID: &str = "1";
const SEED_TITLE: &str = "Welcome to aurevo";
const SEED_PUBLISHER: &str = "aurevo";
const SEED_PLAYBACK_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

struct VideoList {
    videos: VecDeque<Video>,
    /// Last numeric ID handed out; IDs are strictly increasing.
    last_id: u64,
}

/// Process-lifetime video list, most recent first.
pub struct VideoStore {
    inner: RwLock<VideoList>,
}

impl Default for VideoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoStore {
    /// Create a store holding the single welcome entry.
    pub fn new() -> Self {
        let seed = Video {
            id: SEED_VIDEO_ID.to_string(),
            title: SEED_TITLE.to_string(),
            publisher: SEED_PUBLISHER.to_string(),
            producer: String::new(),
            genre: String::new(),
            age: String::new(),
            playback_url: SEED_PLAYBACK_URL.to_string(),
            external: false,
            created_at: format_utc_rfc3339(Utc::now()),
        };

        Self {
            inner: RwLock::new(VideoList {
                videos: VecDeque::from([seed]),
                last_id: 0,
            }),
        }
    }

    /// Snapshot of every video, newest first.
    pub async fn list(&self) -> Vec<Video> {
        self.inner.read().await.videos.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.videos.len()
    }

    /// Insert a video at the front of the list and return it.
    ///
    /// The ID is the creation time in milliseconds, bumped past the
    /// previous ID when two creations land in the same millisecond.
    pub async fn create(&self, new: NewVideo) -> Video {
        let now = Utc::now();
        let mut list = self.inner.write().await;

        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let id = millis.max(list.last_id + 1);
        list.last_id = id;

        let video = Video {
            id: id.to_string(),
            title: new.title,
            publisher: new.publisher,
            producer: new.producer,
            genre: new.genre,
            age: new.age,
            playback_url: new.playback_url,
            external: new.external,
            created_at: format_utc_rfc3339(now),
        };

        list.videos.push_front(video.clone());
        video
    }
}
