mod common;

use std::{collections::HashSet, path::PathBuf, time::Duration};

use chatsync::{
    config::{self, Config},
    sync::{self, SyncError},
};
use common::{Entry, FakeApi, track};
use tempfile::{TempDir, tempdir};
use tokio::time::Instant;

// Helper function to write a chat export into a temp dir
fn write_export(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// Helper function to build a config with the given playlist roles
fn config_with(target: Option<&str>, comparison: &[&str], load_until: Option<&str>) -> Config {
    let mut config = Config::default();
    config.spotify.username = "someone".to_string();
    config.playlists.target = target.map(String::from);
    config.playlists.comparison = comparison.iter().map(|id| id.to_string()).collect();
    config.playlists.load_until = load_until.map(String::from);
    config
}

fn link(id: &str) -> String {
    format!("https://open.spotify.com/track/{}", id)
}

fn numbered_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("t{:03}", i)).collect()
}

#[tokio::test]
async fn test_collect_track_ids_follows_pages() {
    let api = FakeApi::new().with_playlist(
        "p1",
        vec![
            vec![track("a"), Entry::Removed, Entry::Local],
            vec![track("b"), track("a")],
            vec![],
            vec![track("c")],
        ],
    );

    let ids = sync::collect_track_ids(&api, "p1").await;

    assert_eq!(ids, vec!["a", "b", "a", "c"]);
}

#[tokio::test]
async fn test_collect_track_ids_tolerates_failure() {
    let api = FakeApi::new().failing_playlist("broken");

    assert!(sync::collect_track_ids(&api, "broken").await.is_empty());
}

#[tokio::test]
async fn test_make_baseline_unions_readable_playlists() {
    let api = FakeApi::new()
        .with_tracks("p1", &["a", "b"])
        .with_tracks("p3", &["b", "c"])
        .failing_playlist("p2");

    let playlists = vec!["p1".to_string(), "p2".to_string(), "p3".to_string()];

    let baseline = sync::make_baseline(&api, &playlists).await;

    let expected: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
    assert_eq!(baseline, expected);
}

#[tokio::test]
async fn test_add_tracks_in_batches_splits_by_hundred() {
    let api = FakeApi::new();
    let ids = numbered_ids(250);

    let added = sync::add_tracks_in_batches(&api, "target", &ids, Duration::ZERO).await;

    let calls = api.add_calls();
    let sizes: Vec<usize> = calls.iter().map(|(_, uris)| uris.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(added, 250);
    assert!(calls.iter().all(|(playlist, _)| playlist == "target"));
    assert_eq!(calls[0].1[0], "spotify:track:t000");
    assert_eq!(calls[2].1[49], "spotify:track:t249");
}

#[tokio::test]
async fn test_add_tracks_in_batches_skips_failed_batch() {
    let api = FakeApi::new().failing_batch(1);
    let ids = numbered_ids(250);

    let added = sync::add_tracks_in_batches(&api, "target", &ids, Duration::ZERO).await;

    // The failed batch is not retried and not counted
    assert_eq!(api.add_calls().len(), 3);
    assert_eq!(added, 150);
}

#[tokio::test(start_paused = true)]
async fn test_add_tracks_in_batches_waits_between_batches() {
    let api = FakeApi::new();

    let start = Instant::now();
    let added =
        sync::add_tracks_in_batches(&api, "target", &numbered_ids(250), sync::BATCH_DELAY).await;
    assert_eq!(added, 250);
    assert_eq!(start.elapsed(), 2 * sync::BATCH_DELAY);

    // A single batch is written without any delay
    let start = Instant::now();
    let added =
        sync::add_tracks_in_batches(&api, "target", &numbered_ids(1), sync::BATCH_DELAY).await;
    assert_eq!(added, 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test]
async fn test_add_tracks_in_batches_without_tracks() {
    let api = FakeApi::new();

    let added = sync::add_tracks_in_batches(&api, "target", &[], Duration::ZERO).await;

    assert_eq!(added, 0);
    assert!(api.add_calls().is_empty());
}

#[tokio::test]
async fn test_update_playlist_adds_only_new_tracks() {
    let dir = tempdir().unwrap();
    let export = write_export(
        &dir,
        "091624_chat.txt",
        &format!(
            "[1/9/24, 10:00:00] Ana: {}\n[2/9/24, 11:00:00] Ben: {} {}\n[3/9/24, 12:00:00] Ana: {}\n",
            link("a"),
            link("b"),
            link("c"),
            link("a")
        ),
    );
    let api = FakeApi::new().with_tracks("old", &["b", "c"]);
    let config = config_with(Some("target"), &["old"], None);

    let added = sync::update_playlist(&api, &config, &export, None)
        .await
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(
        api.add_calls(),
        vec![("target".to_string(), vec!["spotify:track:a".to_string()])]
    );
}

#[tokio::test]
async fn test_update_playlist_second_run_adds_nothing() {
    let dir = tempdir().unwrap();
    let export = write_export(
        &dir,
        "chat_chat.txt",
        &format!("[1/9/24, 10:00:00] Ana: {} {}\n", link("a"), link("b")),
    );
    let api = FakeApi::new().with_tracks("old", &["b"]);
    // The target also serves as a comparison playlist
    let config = config_with(Some("target"), &["old", "target"], None);

    let first = sync::update_playlist(&api, &config, &export, None)
        .await
        .unwrap();
    let second = sync::update_playlist(&api, &config, &export, None)
        .await
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert_eq!(api.add_calls().len(), 1);
}

#[tokio::test]
async fn test_update_playlist_uses_configured_cutoff() {
    let dir = tempdir().unwrap();
    let export = write_export(
        &dir,
        "cutoff_chat.txt",
        &format!(
            "{}\n[1/9/24, 10:00:00] Ana: {}\n[5/9/24, 10:00:00] Ben: {}\n",
            link("undated"),
            link("x"),
            link("y")
        ),
    );
    let api = FakeApi::new();
    let config = config_with(Some("target"), &[], Some("3/9/24"));

    let added = sync::update_playlist(&api, &config, &export, None)
        .await
        .unwrap();

    assert_eq!(added, 1);
    assert_eq!(api.add_calls()[0].1, vec!["spotify:track:x"]);
}

#[tokio::test]
async fn test_update_playlist_argument_overrides_cutoff() {
    let dir = tempdir().unwrap();
    let export = write_export(
        &dir,
        "cutoff_chat.txt",
        &format!(
            "[1/9/24, 10:00:00] Ana: {}\n[5/9/24, 10:00:00] Ben: {}\n",
            link("x"),
            link("y")
        ),
    );
    let api = FakeApi::new();
    let config = config_with(Some("target"), &[], Some("3/9/24"));

    let added = sync::update_playlist(&api, &config, &export, Some("5/9/24"))
        .await
        .unwrap();

    assert_eq!(added, 2);
}

#[tokio::test]
async fn test_update_playlist_invalid_cutoff_writes_nothing() {
    let dir = tempdir().unwrap();
    let export = write_export(
        &dir,
        "bad_chat.txt",
        &format!("[1/9/24, 10:00:00] Ana: {}\n", link("x")),
    );
    let api = FakeApi::new();
    let config = config_with(Some("target"), &[], Some("September 3rd"));

    let result = sync::update_playlist(&api, &config, &export, None).await;

    assert!(matches!(result, Err(SyncError::DateError(_, _))));
    assert!(api.add_calls().is_empty());
}

#[tokio::test]
async fn test_update_playlist_requires_target() {
    let dir = tempdir().unwrap();
    let export = write_export(&dir, "a_chat.txt", &link("x"));
    let api = FakeApi::new();
    let config = config_with(None, &[], None);

    let result = sync::update_playlist(&api, &config, &export, None).await;

    assert!(matches!(result, Err(SyncError::MissingTarget)));
}

#[tokio::test]
async fn test_update_playlist_missing_file() {
    let dir = tempdir().unwrap();
    let api = FakeApi::new();
    let config = config_with(Some("target"), &[], None);

    let result =
        sync::update_playlist(&api, &config, &dir.path().join("gone_chat.txt"), None).await;

    assert!(matches!(result, Err(SyncError::IoError(_))));
}

#[tokio::test]
async fn test_create_playlist_promotes_and_persists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let config = config_with(Some("current"), &["older"], None);
    config::save(&config_path, &config).await.unwrap();
    let api = FakeApi::new();

    let (playlist, updated) =
        sync::create_playlist(&api, &config_path, config, "Group Picks", true, true)
            .await
            .unwrap();

    assert_eq!(playlist.id, "new1");
    assert_eq!(updated.playlists.target.as_deref(), Some("new1"));
    assert_eq!(updated.playlists.comparison, vec!["older", "current"]);
    assert_eq!(config::load(&config_path).await.unwrap(), updated);
    assert_eq!(
        api.created.lock().unwrap().clone(),
        vec![("someone".to_string(), "Group Picks".to_string(), true)]
    );
}

#[tokio::test]
async fn test_create_playlist_without_config_update() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let config = config_with(Some("current"), &[], None);
    let api = FakeApi::new();

    let (playlist, unchanged) =
        sync::create_playlist(&api, &config_path, config.clone(), "Side list", false, false)
            .await
            .unwrap();

    assert_eq!(playlist.uri, "spotify:playlist:new1");
    assert_eq!(unchanged, config);
    assert!(!config_path.exists());
}
