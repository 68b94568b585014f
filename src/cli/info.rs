use std::path::Path;

use tabled::Table;

use crate::{config::Config, management::TokenManager, types::PlaylistRoleRow};

pub fn info(config_path: &Path, config: &Config) {
    let row = |role: &str, playlist: String| PlaylistRoleRow {
        role: role.to_string(),
        playlist,
    };

    let mut rows = vec![row(
        "target",
        config
            .playlists
            .target
            .clone()
            .unwrap_or_else(|| "(not set)".to_string()),
    )];

    if config.playlists.comparison.is_empty() {
        rows.push(row("comparison", "(none)".to_string()));
    }
    for playlist_id in &config.playlists.comparison {
        rows.push(row("comparison", playlist_id.clone()));
    }

    if let Some(cutoff) = &config.playlists.load_until {
        rows.push(row("load until", cutoff.clone()));
    }

    println!("Config: {}", config_path.display());
    println!(
        "Token:  {}",
        if TokenManager::token_path().is_file() {
            "cached"
        } else {
            "missing (run chatsync auth)"
        }
    );
    println!("{}", Table::new(rows));
}
