//! # API Module
//!
//! HTTP endpoints of the short-lived server that runs while the user
//! authorizes chatsync in the browser.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives Spotify's redirect, checks the `state`
//!   parameter and exchanges the authorization code for a token. Served on
//!   the path of the configured redirect URI.
//! - [`health`] - Reports that the server is up and whether a token has
//!   been obtained yet.
//!
//! Both handlers share the pending [`crate::types::PkceSession`] through an
//! axum `Extension`.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
