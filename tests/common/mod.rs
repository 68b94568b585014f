#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chatsync::{
    Res,
    spotify::PlaylistApi,
    types::{AddTrackToPlaylistResponse, CreatePlaylistResponse, Page, PlaylistItem, TrackObject},
};

/// Entry of a fake playlist page. `Removed` has no track object, `Local` a local
/// file without a Spotify id.
#[derive(Debug, Clone)]
pub enum Entry {
    Track(String),
    Removed,
    Local,
}

pub fn track(id: &str) -> Entry {
    Entry::Track(id.to_string())
}

/// In-memory playlist service. Successful adds are applied to the stored
/// playlists so later reads see them.
#[derive(Default)]
pub struct FakeApi {
    playlists: Mutex<HashMap<String, Vec<Vec<Entry>>>>,
    failing_playlists: HashSet<String>,
    failing_batches: HashSet<usize>,
    pub add_calls: Mutex<Vec<(String, Vec<String>)>>,
    pub created: Mutex<Vec<(String, String, bool)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(self, playlist_id: &str, pages: Vec<Vec<Entry>>) -> Self {
        self.playlists
            .lock()
            .unwrap()
            .insert(playlist_id.to_string(), pages);
        self
    }

    pub fn with_tracks(self, playlist_id: &str, ids: &[&str]) -> Self {
        let page = ids.iter().map(|id| track(id)).collect();
        self.with_playlist(playlist_id, vec![page])
    }

    pub fn failing_playlist(mut self, playlist_id: &str) -> Self {
        self.failing_playlists.insert(playlist_id.to_string());
        self
    }

    /// Makes the n-th add request (0-based, across all playlists) fail.
    pub fn failing_batch(mut self, call_index: usize) -> Self {
        self.failing_batches.insert(call_index);
        self
    }

    pub fn add_calls(&self) -> Vec<(String, Vec<String>)> {
        self.add_calls.lock().unwrap().clone()
    }
}

fn to_item(entry: &Entry) -> PlaylistItem {
    match entry {
        Entry::Track(id) => PlaylistItem {
            track: Some(TrackObject {
                id: Some(id.clone()),
                name: format!("Track {}", id),
            }),
        },
        Entry::Removed => PlaylistItem { track: None },
        Entry::Local => PlaylistItem {
            track: Some(TrackObject {
                id: None,
                name: "local file".to_string(),
            }),
        },
    }
}

#[async_trait]
impl PlaylistApi for FakeApi {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        if self.failing_playlists.contains(playlist_id) {
            return Err(format!("http status 404 for playlist {}", playlist_id).into());
        }

        let playlists = self.playlists.lock().unwrap();
        let Some(pages) = playlists.get(playlist_id) else {
            return Ok(Page {
                items: Vec::new(),
                next: None,
            });
        };

        let index = match cursor {
            Some(token) => token.trim_start_matches("page-").parse::<usize>()?,
            None => 0,
        };
        let items = pages
            .get(index)
            .map(|page| page.iter().map(to_item).collect())
            .unwrap_or_default();
        let next = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));

        Ok(Page { items, next })
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Res<AddTrackToPlaylistResponse> {
        let call_index = {
            let mut calls = self.add_calls.lock().unwrap();
            calls.push((playlist_id.to_string(), uris.clone()));
            calls.len() - 1
        };

        if self.failing_batches.contains(&call_index) {
            return Err("http status 502 Bad Gateway".into());
        }

        let mut playlists = self.playlists.lock().unwrap();
        let pages = playlists.entry(playlist_id.to_string()).or_default();
        if pages.is_empty() {
            pages.push(Vec::new());
        }
        if let Some(last) = pages.last_mut() {
            last.extend(
                uris.iter()
                    .map(|uri| track(uri.trim_start_matches("spotify:track:"))),
            );
        }

        Ok(AddTrackToPlaylistResponse {
            snapshot_id: format!("snapshot-{}", call_index),
        })
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        let mut created = self.created.lock().unwrap();
        created.push((user_id.to_string(), name.to_string(), public));
        let id = format!("new{}", created.len());

        Ok(CreatePlaylistResponse {
            uri: format!("spotify:playlist:{}", id),
            id,
            name: name.to_string(),
        })
    }
}
