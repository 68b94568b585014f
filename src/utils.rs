use std::net::{SocketAddr, ToSocketAddrs};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

/// Date format of chat timestamps and of the `load_until` cutoff (day/month/2-digit year).
pub const CHAT_DATE_FORMAT: &str = "%d/%m/%y";

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state() -> String {
    random_alphanumeric(16)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Parses a `D/M/YY` chat date such as `1/9/24`.
pub fn parse_chat_date(date: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date.trim(), CHAT_DATE_FORMAT)
}

/// Spotify URI for a track id, as expected by the playlist endpoints.
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// Socket address and path the OAuth callback server must serve for `redirect_uri`.
pub fn callback_endpoint(redirect_uri: &str) -> Result<(SocketAddr, String), String> {
    let url = Url::parse(redirect_uri).map_err(|e| format!("Invalid redirect URI: {}", e))?;
    let host = url
        .host_str()
        .ok_or_else(|| format!("Redirect URI {} has no host", redirect_uri))?;
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("Redirect URI {} has no port", redirect_uri))?;

    let addr = (host.trim_start_matches('[').trim_end_matches(']'), port)
        .to_socket_addrs()
        .map_err(|e| format!("Cannot resolve {}: {}", host, e))?
        .next()
        .ok_or_else(|| format!("Cannot resolve {}", host))?;

    let path = match url.path() {
        "" => "/".to_string(),
        p => p.to_string(),
    };

    Ok((addr, path))
}
