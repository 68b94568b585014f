use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::config::Credentials;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PkceSession {
    pub code_verifier: String,
    pub state: String,
    pub credentials: Credentials,
    pub token: Option<Token>,
}

/// A track link found in a chat export.
///
/// `date` is the raw `D/M/YY` date of the most recent timestamp line seen
/// before the link, or `None` when the link precedes every timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRef {
    pub date: Option<String>,
    pub id: String,
}

impl TrackRef {
    pub fn new(date: Option<&str>, id: &str) -> Self {
        Self {
            date: date.map(str::to_string),
            id: id.to_string(),
        }
    }
}

/// One page of a paginated listing. `next` is the continuation token (the
/// URL of the following page); `None` marks the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<TrackObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl PlaylistItem {
    /// Track id of the item; `None` for removed tracks and local files.
    pub fn track_id(&self) -> Option<&str> {
        self.track.as_ref().and_then(|t| t.id.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct PlaylistRoleRow {
    pub role: String,
    pub playlist: String,
}
