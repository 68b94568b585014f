use std::path::PathBuf;

use chrono::Utc;

use crate::{
    Res,
    config::{self, Credentials},
    spotify::auth,
    types::Token,
    warning,
};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    credentials: Credentials,
}

impl TokenManager {
    pub fn new(token: Token, credentials: Credentials) -> Self {
        TokenManager { token, credentials }
    }

    pub async fn load(credentials: Credentials) -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token, credentials })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire.
    ///
    /// A failed refresh keeps the old token; the following request then
    /// fails with an authorization error that the caller reports.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            match self.refresh().await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh Spotify token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        is_expired_at(&self.token, Utc::now().timestamp() as u64)
    }

    async fn refresh(&self) -> Res<Token> {
        auth::refresh_token(&self.token.refresh_token, &self.credentials).await
    }

    pub fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

/// Whether `token` is expired, or within the refresh margin, at `now` (unix seconds).
pub fn is_expired_at(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN >= token.obtained_at + token.expires_in
}
