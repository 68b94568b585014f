use crate::{config::Config, error, management::TokenManager, spotify, success};

pub async fn auth(config: &Config) {
    let credentials = config.spotify.with_env_overrides();

    let token = match spotify::auth::authorize(credentials.clone()).await {
        Ok(token) => token,
        Err(e) => error!("{}", e),
    };

    let token_manager = TokenManager::new(token, credentials);
    if let Err(e) = token_manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    success!("Authentication successful!");
}
