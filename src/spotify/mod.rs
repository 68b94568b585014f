//! # Spotify Integration Module
//!
//! This module is the integration layer between chatsync and the Spotify Web
//! API. It covers the three playlist operations the sync pipeline consumes,
//! plus the OAuth flow that authorizes them.
//!
//! ## Architecture
//!
//! ```text
//! Sync pipeline (reader, writer, create)
//!          ↓
//! PlaylistApi trait
//!          ↓
//! SpotifyClient (reqwest, bearer token from TokenManager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline only talks to [`PlaylistApi`], so it can run against an
//! in-memory implementation in tests.
//!
//! ## Authentication
//!
//! [`auth`] implements the authorization code flow with PKCE:
//! 1. **Code Verifier Generation**: random verifier plus a random `state`
//! 2. **Challenge Creation**: SHA256 challenge derived from the verifier
//! 3. **Authorization Request**: browser opened on Spotify's authorize page
//! 4. **Local Callback**: a temporary axum server receives the code
//! 5. **Token Exchange**: code + verifier + client credentials for a token
//! 6. **Token Storage**: token cached in the local data directory
//!
//! The requested scope is fixed to `playlist-modify-public
//! playlist-modify-private`.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{playlist_id}/tracks` - paginated playlist items
//! - `POST /playlists/{playlist_id}/tracks` - add up to 100 tracks
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Error Handling
//!
//! All operations return [`crate::Res`]; HTTP error statuses are turned into
//! errors with `error_for_status`. There is no retry: callers decide whether
//! a failure is fatal or skipped.

pub mod auth;
pub mod playlist;

pub use playlist::SpotifyClient;

use async_trait::async_trait;

use crate::{
    Res,
    types::{AddTrackToPlaylistResponse, CreatePlaylistResponse, Page, PlaylistItem},
};

/// Playlist operations the sync pipeline needs from the streaming service.
#[async_trait]
pub trait PlaylistApi: Send + Sync {
    /// Fetches one page of a playlist's items.
    ///
    /// `cursor` is `None` for the first page, otherwise the `next` token of
    /// the previous page.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Res<Page<PlaylistItem>>;

    /// Appends tracks (as `spotify:track:` URIs) to a playlist.
    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Res<AddTrackToPlaylistResponse>;

    /// Creates a playlist owned by `user_id`.
    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse>;
}
