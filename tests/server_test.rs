use std::sync::Arc;

use hebdo::{config::SpotifySettings, server, types::PkceToken};
use tokio::sync::Mutex;

fn settings() -> SpotifySettings {
    SpotifySettings {
        client_id: "client".to_string(),
        client_secret: None,
        refresh_token: None,
        api_url: "http://127.0.0.1:9/v1".to_string(),
        token_url: "http://127.0.0.1:9/api/token".to_string(),
        auth_url: "http://127.0.0.1:9/authorize".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        scope: "playlist-modify-private".to_string(),
        server_address: "127.0.0.1:0".to_string(),
    }
}

// Serves the callback routes on an ephemeral port and returns its base URL.
async fn serve() -> String {
    let state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    let app = server::app(state, Arc::new(settings()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_reports_service() {
    let base = serve().await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "hebdo");
}

#[tokio::test]
async fn test_callback_without_code() {
    let base = serve().await;

    let response = reqwest::get(format!("{}/callback", base)).await.unwrap();

    assert!(response.status().is_success());
    assert!(response.text().await.unwrap().contains("Missing authorization code"));
}

#[tokio::test]
async fn test_callback_reaches_shared_state() {
    let base = serve().await;

    // Both extensions must be attached for the handler to run at all
    let response = reqwest::get(format!("{}/callback?code=abc", base))
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Missing PKCE code verifier")
    );
}
