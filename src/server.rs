use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{Res, api, config::SpotifySettings, error::Error, types::PkceToken};

/// Routes of the callback server with the shared PKCE state and settings attached.
pub fn app(state: Arc<Mutex<Option<PkceToken>>>, settings: Arc<SpotifySettings>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(settings))
}

/// Serves `/callback` and `/health` until the process exits.
pub async fn start_api_server(
    state: Arc<Mutex<Option<PkceToken>>>,
    settings: Arc<SpotifySettings>,
) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_address).map_err(|_| Error::InvalidEnv {
        name: "SERVER_ADDRESS",
        value: settings.server_address.clone(),
    })?;

    let app = app(state, settings);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("cannot bind {}: {}", addr, e)))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Config(format!("callback server failed: {}", e)))
}
