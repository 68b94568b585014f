use std::time::Duration;

use tokio::time::sleep;

use crate::{failure, spotify::PlaylistApi, success, utils};

/// Maximum number of tracks Spotify accepts in one add request.
pub const BATCH_SIZE: usize = 100;

/// Pause between two add requests.
pub const BATCH_DELAY: Duration = Duration::from_secs(1);

/// Appends `track_ids` to a playlist in batches of [`BATCH_SIZE`].
///
/// A failed batch is logged and skipped; batches already written stay
/// written. Waits `delay` between batches.
///
/// Returns the number of tracks in the batches that succeeded.
pub async fn add_tracks_in_batches<A>(
    api: &A,
    playlist_id: &str,
    track_ids: &[String],
    delay: Duration,
) -> usize
where
    A: PlaylistApi + ?Sized,
{
    let mut added = 0;

    for (i, batch) in track_ids.chunks(BATCH_SIZE).enumerate() {
        if i > 0 {
            sleep(delay).await;
        }

        let uris: Vec<String> = batch.iter().map(|id| utils::track_uri(id)).collect();
        match api.add_tracks(playlist_id, uris).await {
            Ok(_) => {
                added += batch.len();
                success!("Added {} tracks to the playlist", batch.len());
            }
            Err(e) => failure!("Error adding tracks: {}", e),
        }
    }

    added
}
