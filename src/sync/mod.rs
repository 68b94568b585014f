//! # Sync Pipeline
//!
//! Reads the chat export, builds the baseline of tracks already known from
//! the comparison playlists, reconciles the two and writes whatever is new
//! to the target playlist.
//!
//! ```text
//! chat export ─► extract ─┐
//!                         ├─► reconcile ─► writer ─► target playlist
//! comparison playlists ─► reader (baseline)
//! ```
//!
//! Remote failures while reading a comparison playlist or writing a batch
//! are logged and skipped. An unparseable date aborts the run with
//! [`SyncError::DateError`].

mod reader;
mod reconcile;
mod writer;

pub use reader::{collect_track_ids, make_baseline};
pub use reconcile::{compare_track_lists, filter_until, reconcile};
pub use writer::{BATCH_DELAY, BATCH_SIZE, add_tracks_in_batches};

use std::{fmt, io, path::Path};

use crate::{
    Res,
    config::{self, Config},
    extract, info,
    spotify::PlaylistApi,
    success,
    types::CreatePlaylistResponse,
};

#[derive(Debug)]
pub enum SyncError {
    IoError(io::Error),
    DateError(String, chrono::ParseError),
    MissingTarget,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::IoError(e) => write!(f, "Cannot read chat export: {}", e),
            SyncError::DateError(date, e) => {
                write!(f, "Invalid date '{}' (expected D/M/YY): {}", date, e)
            }
            SyncError::MissingTarget => write!(
                f,
                "No target playlist configured. Run `chatsync create <NAME>` or set target_playlist."
            ),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<io::Error> for SyncError {
    fn from(err: io::Error) -> Self {
        SyncError::IoError(err)
    }
}

/// Syncs the tracks of one chat export into the target playlist.
///
/// `load_until` overrides the cutoff from the configuration.
///
/// Returns the number of tracks added.
pub async fn update_playlist<A>(
    api: &A,
    config: &Config,
    file_path: &Path,
    load_until: Option<&str>,
) -> Result<usize, SyncError>
where
    A: PlaylistApi + ?Sized,
{
    let target = config
        .playlists
        .target
        .as_deref()
        .ok_or(SyncError::MissingTarget)?;

    let refs = extract::read_export(file_path).await?;
    let baseline = make_baseline(api, &config.playlists.comparison).await;

    let cutoff = load_until.or(config.playlists.load_until.as_deref());
    let new_tracks = reconcile(&baseline, &refs, cutoff)?;
    info!(
        "Found {} track links in {}, {} of them new",
        refs.len(),
        file_path.display(),
        new_tracks.len()
    );

    let added = add_tracks_in_batches(api, target, &new_tracks, BATCH_DELAY).await;
    success!("Total number of songs added to the playlist: {}", added);
    Ok(added)
}

/// Creates a playlist for the configured user.
///
/// With `update_config` the new playlist becomes the target and the
/// configuration at `config_path` is rewritten; the returned config is the
/// one now in effect.
pub async fn create_playlist<A>(
    api: &A,
    config_path: &Path,
    config: Config,
    name: &str,
    public: bool,
    update_config: bool,
) -> Res<(CreatePlaylistResponse, Config)>
where
    A: PlaylistApi + ?Sized,
{
    let username = config.spotify.with_env_overrides().username;
    let playlist = api.create_playlist(&username, name, public).await?;
    success!(
        "Created new playlist: {} with URI: {}",
        playlist.name,
        playlist.uri
    );

    if !update_config {
        return Ok((playlist, config));
    }

    let config = config::promote_and_persist(config_path, config, &playlist.id).await?;
    success!(
        "Updated config file. New playlist {} is now the target playlist.",
        playlist.id
    );
    Ok((playlist, config))
}
