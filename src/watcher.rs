//! Directory watcher that syncs new chat exports as they appear.
//!
//! Filesystem events arrive on the notifier's own thread and are forwarded
//! over a channel into a single async loop, so at most one sync runs at a
//! time. The loop ends on Ctrl-C; a sync already running is finished first.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    pin::pin,
    time::Duration,
};

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::{sync::mpsc, time::sleep};

use crate::{Res, config::Config, failure, info, spotify::PlaylistApi, success, sync};

/// File name suffix of chat exports.
pub const CHAT_SUFFIX: &str = "_chat.txt";

/// Wait after a create event so the exporter can finish writing the file.
pub const DEBOUNCE: Duration = Duration::from_secs(2);

pub fn is_chat_export(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(CHAT_SUFFIX))
}

/// Paths that were synced successfully.
///
/// Entries are never evicted, so the set grows for the lifetime of the
/// process.
#[derive(Debug, Default)]
pub struct ProcessedFiles {
    paths: HashSet<PathBuf>,
}

impl ProcessedFiles {
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    pub fn insert(&mut self, path: &Path) {
        self.paths.insert(path.to_path_buf());
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a chat export, a directory, or already processed.
    Ignored,
    /// Synced; carries the number of tracks added.
    Processed(usize),
    /// The sync failed; the path stays unprocessed.
    Failed,
}

pub struct ChatWatcher<'a, A: PlaylistApi + ?Sized> {
    api: &'a A,
    config: &'a Config,
    processed: ProcessedFiles,
    debounce: Duration,
}

impl<'a, A: PlaylistApi + ?Sized> ChatWatcher<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self {
            api,
            config,
            processed: ProcessedFiles::default(),
            debounce: DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn processed(&self) -> &ProcessedFiles {
        &self.processed
    }

    /// Reacts to a created path: debounce, sync, remember on success.
    ///
    /// Sync errors are logged and never propagated, so the watch loop keeps
    /// running. A failed path may be retried by a later event.
    pub async fn handle_created(&mut self, path: &Path) -> Outcome {
        if !is_chat_export(path) || path.is_dir() || self.processed.contains(path) {
            return Outcome::Ignored;
        }

        sleep(self.debounce).await;
        info!("New chat file detected {}", path.display());

        match sync::update_playlist(self.api, self.config, path, None).await {
            Ok(added) => {
                self.processed.insert(path);
                success!("Successfully processed {}", path.display());
                Outcome::Processed(added)
            }
            Err(e) => {
                failure!("Error processing {}: {}", path.display(), e);
                Outcome::Failed
            }
        }
    }

    /// Watches `dir` (non-recursively) until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Fails only if the directory cannot be created or watched.
    pub async fn run(&mut self, dir: &Path) -> Res<()> {
        self.run_until(dir, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                failure!("Cannot listen for Ctrl-C: {}", e);
            }
        })
        .await
    }

    /// Watches `dir` (non-recursively) until `shutdown` completes, then
    /// stops the notifier and returns.
    ///
    /// A sync in progress when `shutdown` completes is finished first.
    pub async fn run_until<F>(&mut self, dir: &Path, shutdown: F) -> Res<()>
    where
        F: Future<Output = ()>,
    {
        async_fs::create_dir_all(dir).await?;

        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) if matches!(event.kind, EventKind::Create(_)) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => failure!("Watch error: {}", e),
            }
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Watching directory: {}", dir.display());

        let mut shutdown = pin!(shutdown);
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(path) => {
                        self.handle_created(&path).await;
                    }
                    None => break,
                },
                _ = &mut shutdown => {
                    info!("Stopping watcher");
                    break;
                }
            }
        }

        watcher.unwatch(dir)?;
        Ok(())
    }
}
