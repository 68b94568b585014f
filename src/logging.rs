//! Plain-text log file sink used by the output macros.
//!
//! Console output is always produced by the macros themselves. When a sink
//! is installed every message is additionally appended to the file as
//! `<timestamp> - <LEVEL> - <message>`.

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::Local;

static SINK: OnceLock<Mutex<File>> = OnceLock::new();

/// Opens `path` in append mode and installs it as the log file.
///
/// # Errors
///
/// Fails with [`io::ErrorKind::AlreadyExists`] when a sink is already
/// installed; the existing sink stays in place.
pub fn init_file_sink(path: &Path) -> io::Result<()> {
    if SINK.get().is_some() {
        return Err(already_installed());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    SINK.set(Mutex::new(file)).map_err(|_| already_installed())
}

fn already_installed() -> io::Error {
    io::Error::new(io::ErrorKind::AlreadyExists, "a log file is already installed")
}

/// Appends one line to the log file, if a sink is installed.
///
/// Write failures are ignored; the console line has already been printed.
pub fn record(level: &str, args: fmt::Arguments<'_>) {
    let Some(sink) = SINK.get() else {
        return;
    };

    if let Ok(mut file) = sink.lock() {
        let _ = writeln!(file, "{}", format_line(level, args));
    }
}

pub fn format_line(level: &str, args: fmt::Arguments<'_>) -> String {
    format!(
        "{} - {} - {}",
        Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
        level,
        args
    )
}

/// Default log file location: `<data_local_dir>/chatsync/playlist_updates.log`.
pub fn default_log_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chatsync/playlist_updates.log");
    path
}
