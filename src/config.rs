//! Configuration management for the chat export playlist sync.
//!
//! The persisted configuration is a TOML file with two sections:
//!
//! ```toml
//! [spotify]
//! client_id = "..."
//! client_secret = "..."
//! redirect_uri = "http://127.0.0.1:8888/callback"
//! username = "..."
//!
//! [playlists]
//! target_playlist = "..."
//! comparison_playlists = "id1,id2"
//! load_until = "31/12/24"
//! ```
//!
//! The configuration is loaded once at startup and passed explicitly into the
//! operations that need it. The only mutation, promoting a freshly created
//! playlist to target, produces a new value and rewrites the file before
//! returning. Rewrites touch only the keys whose value changed, so comments
//! and layout of a hand-edited file survive.
//!
//! Credentials can be overridden through environment variables (highest
//! priority), optionally loaded from a `.env` file in the local data
//! directory.

use std::{
    env, fmt, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use toml_edit::{DocumentMut, Item, Table, value};

use crate::warning;

/// Target value written by the old config template to mean "not set yet".
pub const TARGET_PLACEHOLDER: &str = "target_playlist_id";
/// Comparison value written by the old config template to mean "not set yet".
pub const COMPARISON_PLACEHOLDER: &str = "playlist_id1,playlist_id2";

pub const SPOTIFY_SCOPE: &str = "playlist-modify-public playlist-modify-private";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    IoError(io::Error),
    ParseError(toml::de::Error),
    SerializeError(toml::ser::Error),
    EditError(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(
                f,
                "Config file not found at {}. Please create it first.",
                path.display()
            ),
            ConfigError::IoError(e) => write!(f, "Config file could not be accessed: {}", e),
            ConfigError::ParseError(e) => write!(f, "Config file is invalid: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Config could not be written: {}", e),
            ConfigError::EditError(e) => write!(f, "Config could not be updated: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub spotify: Credentials,
    pub playlists: PlaylistRoles,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistRoles {
    /// Playlist new tracks are written to. `None` until one is created or set.
    #[serde(rename = "target_playlist", skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Read-only playlists forming the deduplication baseline.
    #[serde(rename = "comparison_playlists", with = "comma_list")]
    pub comparison: Vec<String>,

    /// Only tracks shared on or before this `D/M/YY` date are synced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_until: Option<String>,
}

impl Config {
    /// Parses a TOML document and normalises "not set" markers.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        Ok(config.normalized())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    /// Makes `playlist_id` the target playlist.
    ///
    /// A real previous target moves into the comparison list so tracks it
    /// already holds keep counting as known. The new target is never left
    /// in the comparison list.
    pub fn promote_target(self, playlist_id: &str) -> Self {
        let mut playlists = self.playlists;

        if let Some(current) = playlists.target.take() {
            if current != playlist_id && !playlists.comparison.contains(&current) {
                playlists.comparison.push(current);
            }
        }
        playlists.comparison.retain(|id| id != playlist_id);
        playlists.target = Some(playlist_id.to_string());

        Self {
            spotify: self.spotify,
            playlists,
        }
    }

    fn normalized(mut self) -> Self {
        self.playlists.target = self
            .playlists
            .target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && t != TARGET_PLACEHOLDER);

        if self.playlists.comparison.join(",") == COMPARISON_PLACEHOLDER {
            self.playlists.comparison.clear();
        }

        self.playlists.load_until = self
            .playlists
            .load_until
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        self
    }
}

impl Credentials {
    /// Returns a copy with `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`,
    /// `SPOTIFY_REDIRECT_URI` and `SPOTIFY_USERNAME` applied on top.
    pub fn with_env_overrides(&self) -> Self {
        let pick = |key: &str, current: &str| env::var(key).unwrap_or_else(|_| current.to_string());
        Self {
            client_id: pick("SPOTIFY_CLIENT_ID", &self.client_id),
            client_secret: pick("SPOTIFY_CLIENT_SECRET", &self.client_secret),
            redirect_uri: pick("SPOTIFY_REDIRECT_URI", &self.redirect_uri),
            username: pick("SPOTIFY_USERNAME", &self.username),
        }
    }
}

/// Loads the configuration file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] when the file does not exist; callers
/// at startup treat this as fatal.
pub async fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = async_fs::read_to_string(path).await?;
    Config::from_toml(&content)
}

/// Writes the configuration to `path`.
///
/// An existing file is edited in place: only keys whose value changed are
/// replaced, keeping comments and unrelated keys. If the existing file
/// cannot be parsed it is replaced by a plain serialization.
///
/// The new content goes to a sibling temporary file first which is then
/// renamed over `path`, so readers never see a half-written file.
pub async fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let content = if path.is_file() {
        let existing = async_fs::read_to_string(path).await?;
        match serialize_preserving_comments(&existing, config) {
            Ok(updated) => updated,
            Err(e) => {
                warning!(
                    "Cannot keep comments of {} ({}). Rewriting the whole file.",
                    path.display(),
                    e
                );
                config.to_toml()?
            }
        }
    } else {
        config.to_toml()?
    };

    let tmp_path = path.with_extension("toml.tmp");
    async_fs::write(&tmp_path, content).await?;
    async_fs::rename(&tmp_path, path).await?;
    Ok(())
}

/// Applies `config` to the TOML document `existing`, replacing only the keys
/// whose value differs from what `existing` already holds.
pub fn serialize_preserving_comments(
    existing: &str,
    config: &Config,
) -> Result<String, ConfigError> {
    let previous = Config::from_toml(existing)?;
    let mut document = existing
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::EditError(e.to_string()))?;

    let spotify = [
        ("client_id", &previous.spotify.client_id, &config.spotify.client_id),
        ("client_secret", &previous.spotify.client_secret, &config.spotify.client_secret),
        ("redirect_uri", &previous.spotify.redirect_uri, &config.spotify.redirect_uri),
        ("username", &previous.spotify.username, &config.spotify.username),
    ];
    let table = section_table(&mut document, "spotify")?;
    for (key, before, after) in spotify {
        set_if_changed(table, key, before, after);
    }

    let unset = String::new();
    let previous_comparison = previous.playlists.comparison.join(",");
    let comparison = config.playlists.comparison.join(",");
    let playlists = [
        (
            "target_playlist",
            previous.playlists.target.as_ref().unwrap_or(&unset),
            config.playlists.target.as_ref().unwrap_or(&unset),
        ),
        ("comparison_playlists", &previous_comparison, &comparison),
        (
            "load_until",
            previous.playlists.load_until.as_ref().unwrap_or(&unset),
            config.playlists.load_until.as_ref().unwrap_or(&unset),
        ),
    ];
    let table = section_table(&mut document, "playlists")?;
    for (key, before, after) in playlists {
        set_if_changed(table, key, before, after);
    }

    Ok(document.to_string())
}

fn section_table<'d>(
    document: &'d mut DocumentMut,
    key: &str,
) -> Result<&'d mut Table, ConfigError> {
    let root = document.as_table_mut();
    if !root.get(key).is_some_and(Item::is_table) {
        root.insert(key, Item::Table(Table::new()));
    }
    root.get_mut(key)
        .and_then(Item::as_table_mut)
        .ok_or_else(|| ConfigError::EditError(format!("[{}] is not a table", key)))
}

fn set_if_changed(table: &mut Table, key: &str, before: &str, after: &str) {
    if table.contains_key(key) && before == after {
        return;
    }

    let decor = table
        .get(key)
        .and_then(|current| current.as_value().map(|v| v.decor().clone()));
    table[key] = value(after);
    if let (Some(decor), Some(next)) = (decor, table[key].as_value_mut()) {
        *next.decor_mut() = decor;
    }
}

/// Promotes `playlist_id` to target and persists the result.
pub async fn promote_and_persist(
    path: &Path,
    config: Config,
    playlist_id: &str,
) -> Result<Config, ConfigError> {
    let updated = config.promote_target(playlist_id);
    save(path, &updated).await?;
    Ok(updated)
}

/// Loads environment variables from `<data_local_dir>/chatsync/.env`, if present.
pub fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Default config location: `<config_dir>/chatsync/config.toml`.
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chatsync/config.toml");
    path
}

/// Local data directory holding the token cache and the default log file.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chatsync");
    path
}

/// Spotify Web API base URL, overridable with `SPOTIFY_API_URL`.
pub fn spotify_api_url() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Spotify authorize URL, overridable with `SPOTIFY_AUTH_URL`.
pub fn spotify_auth_url() -> String {
    env::var("SPOTIFY_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

/// Spotify token URL, overridable with `SPOTIFY_TOKEN_URL`.
pub fn spotify_token_url() -> String {
    env::var("SPOTIFY_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Splits a comma-separated id list, dropping blanks.
pub fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}

mod comma_list {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ids: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ids.join(","))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(super::split_ids(&raw))
    }
}
