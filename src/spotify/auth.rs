use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, RequestBuilder, Url};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Res,
    config::{self, Credentials},
    server::start_api_server,
    types::{PkceSession, Token},
    utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    #[serde(default)]
    scope: String,
    expires_in: u64,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: &str) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .unwrap_or_else(|| previous_refresh_token.to_string()),
            scope: self.scope,
            expires_in: self.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth authorization code flow with PKCE and returns the token.
///
/// 1. Generates the PKCE verifier/challenge and a random `state`
/// 2. Binds the local callback server on the redirect URI's address
/// 3. Opens the authorization URL in the default browser
/// 4. Waits up to two minutes for the callback to deliver a token
/// 5. Stops the callback server
///
/// # Errors
///
/// Fails when the redirect URI is unusable, the callback address cannot be
/// bound, or no token arrives in time.
pub async fn authorize(credentials: Credentials) -> Res<Token> {
    let (addr, callback_path) = utils::callback_endpoint(&credentials.redirect_uri)?;

    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();
    let auth_url = authorize_url(&credentials, &code_challenge, &state)?;

    let shared_state = Arc::new(Mutex::new(Some(PkceSession {
        code_verifier,
        state,
        credentials,
        token: None,
    })));

    let listener = TcpListener::bind(addr).await?;
    let server = tokio::spawn(start_api_server(
        listener,
        callback_path,
        Arc::clone(&shared_state),
    ));

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    token.ok_or_else(|| "Authentication failed or timed out.".into())
}

/// Authorization URL the user is sent to.
pub fn authorize_url(credentials: &Credentials, code_challenge: &str, state: &str) -> Res<Url> {
    let url = Url::parse_with_params(
        &config::spotify_auth_url(),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("state", state),
            ("scope", config::SPOTIFY_SCOPE),
        ],
    )?;
    Ok(url)
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceSession>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|session| session.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(code: &str, verifier: &str, credentials: &Credentials) -> Res<Token> {
    let request = Client::new().post(config::spotify_token_url()).form(&[
        ("grant_type", "authorization_code"),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", credentials.redirect_uri.as_str()),
        ("client_id", credentials.client_id.as_str()),
    ]);

    let json = with_client_auth(request, credentials)
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(json.into_token(""))
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may omit a new refresh token, in which case the old one is kept.
pub async fn refresh_token(refresh_token: &str, credentials: &Credentials) -> Res<Token> {
    let request = Client::new().post(config::spotify_token_url()).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", credentials.client_id.as_str()),
    ]);

    let json = with_client_auth(request, credentials)
        .send()
        .await?
        .error_for_status()?
        .json::<TokenResponse>()
        .await?;

    Ok(json.into_token(refresh_token))
}

// Without a secret the app is a public PKCE client and client_id in the form is enough.
fn with_client_auth(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
    if credentials.client_secret.is_empty() {
        request
    } else {
        request.basic_auth(&credentials.client_id, Some(&credentials.client_secret))
    }
}
