use std::path::{Path, PathBuf};

use crate::{config::Config, error, logging, watcher::ChatWatcher};

pub async fn watch(config: &Config, directory: &Path, log_file: Option<PathBuf>) {
    let log_path = log_file.unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init_file_sink(&log_path) {
        error!("Cannot open log file {}: {}", log_path.display(), e);
    }

    let client = super::connect(config).await;
    let mut watcher = ChatWatcher::new(&client, config);
    if let Err(e) = watcher.run(directory).await {
        error!("Cannot watch {}: {}", directory.display(), e);
    }
}
