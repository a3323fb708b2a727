use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::SpotifySettings,
    error::Error,
    info,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

/// Raw token endpoint response. `refresh_token` is omitted when Spotify
/// keeps the previous one.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: &str) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .unwrap_or_else(|| previous_refresh_token.to_string()),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the one-time OAuth 2.0 PKCE authorization.
///
/// 1. Generates a code verifier and its SHA256 challenge
/// 2. Starts the local callback server on `SERVER_ADDRESS`
/// 3. Opens the authorization URL in the browser
/// 4. Waits up to 60 seconds for the callback to exchange the code
/// 5. Persists the token and prints the refresh token for `SPOTIFY_REFRESH_TOKEN`
pub async fn auth(settings: SpotifySettings) -> Res<Token> {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let settings = Arc::new(settings);

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // start API server
    let server_state = Arc::clone(&shared_state);
    let server_settings = Arc::clone(&settings);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, server_settings).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&code_challenge={code_challenge}&code_challenge_method=S256&scope={scope}",
        spotify_auth_url = settings.auth_url,
        client_id = settings.client_id,
        redirect_uri = settings.redirect_uri,
        code_challenge = code_challenge,
        scope = settings.scope.replace(' ', "%20")
    );

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state)
        .await
        .ok_or_else(|| Error::Auth("authorization failed or timed out".to_string()))?;

    TokenManager::new(token.clone()).persist().await?;
    success!("Authentication successful!");
    info!("Refresh token (SPOTIFY_REFRESH_TOKEN): {}", token.refresh_token);

    Ok(token)
}

/// Polls the shared state until the callback stored a token, for at most 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// This is the only token operation of a digest run. When a client secret
/// is configured the request is authenticated with it, otherwise the
/// PKCE-style `client_id` form field is used.
pub async fn refresh_token(settings: &SpotifySettings, refresh_token: &str) -> Res<Token> {
    let client = Client::new();
    let mut request = client.post(&settings.token_url).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", settings.client_id.as_str()),
    ]);
    if let Some(secret) = &settings.client_secret {
        request = request.basic_auth(&settings.client_id, Some(secret));
    }

    let response = request.send().await?;
    let token = super::read_json::<TokenResponse>(response)
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;

    Ok(token.into_token(refresh_token))
}

/// Exchanges an authorization code for a token using the PKCE verifier.
pub async fn exchange_code_pkce(
    settings: &SpotifySettings,
    code: &str,
    verifier: &str,
) -> Res<Token> {
    let client = Client::new();
    let response = client
        .post(&settings.token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", settings.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let token = super::read_json::<TokenResponse>(response)
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;

    Ok(token.into_token(""))
}
