//! # CLI Module
//!
//! User-facing commands of chatsync. Each command loads what it needs,
//! delegates to the library modules and turns failures into readable
//! output.
//!
//! ## Commands
//!
//! - [`auth`] - Authorize chatsync with Spotify and cache the token
//! - [`sync`] - Sync the tracks of one chat export into the target playlist
//! - [`create`] - Create a playlist and make it the new target
//! - [`watch`] - Watch a directory and sync every new chat export
//! - [`info`] - Show the configured playlist roles
//!
//! ## Error Handling
//!
//! Fatal problems (no usable token, invalid dates, missing target) end the
//! one-shot commands with the `error!` macro. Partial remote failures are
//! reported by the sync pipeline and do not stop it.
//!
//! ## Usage Patterns
//!
//! ```bash
//! chatsync auth                              # Authorize once
//! chatsync create "Group Picks 2024-25"      # New target playlist
//! chatsync sync chat/091624_chat.txt         # One-shot sync
//! chatsync sync chat/091624_chat.txt --load-until 31/12/24
//! chatsync watch chat --log-file sync.log    # Keep syncing new exports
//! ```

mod auth;
mod create;
mod info;
mod sync;
mod watch;

pub use auth::auth;
pub use create::create;
pub use info::info;
pub use sync::sync;
pub use watch::watch;

use crate::{config::Config, error, spotify::SpotifyClient};

async fn connect(config: &Config) -> SpotifyClient {
    let credentials = config.spotify.with_env_overrides();
    match SpotifyClient::connect(&credentials).await {
        Ok(client) => client,
        Err(e) => error!("Failed to connect to Spotify. Err: {}", e),
    }
}
