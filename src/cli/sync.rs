use std::path::Path;

use crate::{config::Config, error, sync as pipeline};

pub async fn sync(config: &Config, file: &Path, load_until: Option<String>) {
    if !file.is_file() {
        error!("Chat export {} does not exist", file.display());
    }

    let client = super::connect(config).await;
    if let Err(e) = pipeline::update_playlist(&client, config, file, load_until.as_deref()).await {
        error!("Sync of {} failed: {}", file.display(), e);
    }
}
