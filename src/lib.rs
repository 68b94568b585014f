//! Chat Export Playlist Sync Library
//!
//! This library keeps a Spotify playlist in step with the tracks people share
//! in exported chat logs. It extracts track links from `_chat.txt` exports,
//! compares them against the tracks already present in a set of comparison
//! playlists, and appends whatever is new to the configured target playlist.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Persisted configuration and environment overrides
//! - `extract` - Track link extraction from chat exports
//! - `logging` - Optional file sink behind the output macros
//! - `management` - Token cache management
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `sync` - Baseline reading, reconciliation and batched writes
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `watcher` - Directory watcher triggering the sync pipeline
//!
//! # Example
//!
//! ```
//! use chatsync::{config, sync};
//!
//! #[tokio::main]
//! async fn main() -> chatsync::Res<()> {
//!     let cfg = config::load(&config::default_config_path()).await?;
//!     // Connect a client and call sync::update_playlist...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;
pub mod watcher;

/// A convenient Result type alias for operations that may fail.
///
/// Used for every call that crosses the Spotify boundary, where failures can
/// come from the network, the HTTP status or JSON decoding.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The message is also appended to the log file when a file sink has been
/// installed with [`logging::init_file_sink`].
///
/// # Example
///
/// ```
/// info!("Watching directory: {}", dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
    $crate::logging::record("INFO", std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
    $crate::logging::record("INFO", std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. a comparison playlist that could not
/// be read and is skipped.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
    $crate::logging::record("WARNING", std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red cross and keeps running.
///
/// Used where an operation failed but the program carries on, such as a
/// failed batch write or a chat export the watcher could not process.
#[macro_export]
macro_rules! failure {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "x".red().bold(), std::format_args!($($arg)*));
    $crate::logging::record("ERROR", std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors where recovery is not possible, like a missing
/// configuration file at startup.
///
/// # Example
///
/// ```
/// error!("Config file not found at {}", path.display());
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    $crate::logging::record("ERROR", std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
