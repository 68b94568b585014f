use std::path::Path;

use crate::{config::Config, error, info, sync};

pub async fn create(
    config_path: &Path,
    config: Config,
    name: &str,
    public: bool,
    update_config: bool,
) {
    let client = super::connect(&config).await;

    match sync::create_playlist(&client, config_path, config, name, public, update_config).await {
        Ok((playlist, _)) if !update_config => {
            info!(
                "Config left unchanged. Set target_playlist = \"{}\" to sync into it.",
                playlist.id
            );
        }
        Ok(_) => {}
        Err(e) => error!("Failed to create playlist {}: {}", name, e),
    }
}
