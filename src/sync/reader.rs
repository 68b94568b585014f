use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Res, spotify::PlaylistApi, types::PlaylistItem, warning};

/// Returns the ids of all tracks in a playlist, following pagination.
///
/// A playlist that cannot be read yields an empty list and a warning, so one
/// unreachable playlist never aborts a sync. Duplicates are kept.
pub async fn collect_track_ids<A>(api: &A, playlist_id: &str) -> Vec<String>
where
    A: PlaylistApi + ?Sized,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching tracks of playlist {}...", playlist_id));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = fetch_all_pages(api, playlist_id).await;
    pb.finish_and_clear();

    match result {
        Ok(track_ids) => {
            if track_ids.is_empty() {
                warning!("No tracks found in playlist {}", playlist_id);
            }
            track_ids
        }
        Err(e) => {
            warning!("Error retrieving tracks for playlist {}: {}", playlist_id, e);
            Vec::new()
        }
    }
}

async fn fetch_all_pages<A>(api: &A, playlist_id: &str) -> Res<Vec<String>>
where
    A: PlaylistApi + ?Sized,
{
    let mut track_ids = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = api.playlist_page(playlist_id, cursor.as_deref()).await?;
        track_ids.extend(
            page.items
                .iter()
                .filter_map(PlaylistItem::track_id)
                .map(String::from),
        );

        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(track_ids),
        }
    }
}

/// Union of the tracks of all comparison playlists.
pub async fn make_baseline<A>(api: &A, playlist_ids: &[String]) -> HashSet<String>
where
    A: PlaylistApi + ?Sized,
{
    let mut baseline = HashSet::new();

    for playlist_id in playlist_ids {
        let track_ids = collect_track_ids(api, playlist_id).await;
        if track_ids.is_empty() {
            warning!("Skipping playlist {} due to retrieval error", playlist_id);
            continue;
        }
        baseline.extend(track_ids);
    }

    baseline
}
