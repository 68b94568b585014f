use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::{self, Credentials},
    info,
    management::TokenManager,
    spotify::{PlaylistApi, auth},
    success,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, Page, PlaylistItem,
    },
};

const PAGE_LIMIT: &str = "100";
const ITEM_FIELDS: &str = "items(track(id,name)),next";

/// [`PlaylistApi`] implementation backed by the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_api_url(),
            tokens: Mutex::new(token_mgr),
        }
    }

    /// Builds a client from the cached token, authorizing first if no token
    /// is cached yet.
    pub async fn connect(credentials: &Credentials) -> Res<Self> {
        let token_mgr = match TokenManager::load(credentials.clone()).await {
            Ok(mgr) => mgr,
            Err(_) => {
                info!("No cached Spotify token found, starting authorization...");
                let token = auth::authorize(credentials.clone()).await?;
                let mgr = TokenManager::new(token, credentials.clone());
                mgr.persist().await?;
                success!("Authentication successful!");
                mgr
            }
        };

        Ok(Self::new(token_mgr))
    }

    async fn bearer(&self) -> String {
        self.tokens.lock().await.get_valid_token().await
    }
}

#[async_trait]
impl PlaylistApi for SpotifyClient {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Res<Page<PlaylistItem>> {
        let request = match cursor {
            Some(next) => self.http.get(next),
            None => self
                .http
                .get(format!(
                    "{uri}/playlists/{id}/tracks",
                    uri = self.api_url,
                    id = playlist_id
                ))
                .query(&[("limit", PAGE_LIMIT), ("fields", ITEM_FIELDS)]),
        };

        let response = request
            .bearer_auth(self.bearer().await)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Page<PlaylistItem>>().await?)
    }

    async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
    ) -> Res<AddTrackToPlaylistResponse> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        );

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(self.bearer().await)
            .json(&AddTrackToPlaylistRequest { uris })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<AddTrackToPlaylistResponse>().await?)
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.api_url,
            user_id = user_id
        );

        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: String::new(),
            public,
        };

        let response = self
            .http
            .post(&api_url)
            .bearer_auth(self.bearer().await)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<CreatePlaylistResponse>().await?)
    }
}
