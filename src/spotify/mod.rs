//! # Spotify Integration Module
//!
//! This module is the integration layer between the digest pipeline and the
//! Spotify Web API. It covers the one-time PKCE authorization, the single
//! token refresh performed at the start of every run, and the handful of
//! read and write calls the weekly digest needs.
//!
//! ## Architecture
//!
//! ```text
//! Digest pipeline (scanner, playlist builder, selector)
//!          ↓
//!     Catalog trait
//!          ↓
//! SpotifyClient
//!     ├── Authentication (PKCE, refresh)
//!     ├── Releases (artist albums, album tracks, album, track)
//!     ├── Shows (episodes)
//!     ├── Playlists (current user, create, add items)
//!     └── Recommendations
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! The pipeline only talks to the [`Catalog`] trait, so tests drive it with
//! an in-memory catalog instead of the network.
//!
//! ## API Coverage
//!
//! - `GET /me` - Authenticated account
//! - `GET /artists/{id}/albums` - Releases of a followed artist
//! - `GET /albums/{id}/tracks` - Tracks of a release
//! - `GET /shows/{id}/episodes` - Episodes of a followed show
//! - `GET /albums/{id}` / `GET /tracks/{id}` - Archive entry metadata
//! - `GET /recommendations` - Tracks seeded from the week's releases
//! - `POST /users/{user_id}/playlists` - Create the weekly playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add items to it
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Error Handling
//!
//! Every call returns [`crate::Res`]. Non-success statuses become
//! [`Error::Api`] carrying the message from Spotify's error body. Calls are
//! made once: there is no retry and no rate-limit backoff.

pub mod auth;
pub mod playlist;
pub mod recommendations;
pub mod releases;
pub mod shows;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Res,
    config::SpotifySettings,
    error::Error,
    management::TokenManager,
    types::{
        AddTrackToPlaylistResponse, Album, CreatePlaylistResponse, CurrentUser, Episode,
        GetAlbumResponse, Track,
    },
    utils::ReleaseKinds,
};

/// Calls the digest makes against the music catalog.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    async fn current_user(&self) -> Res<CurrentUser>;

    async fn artist_albums(
        &self,
        artist_id: &str,
        release_kinds: &ReleaseKinds,
        limit: u32,
    ) -> Res<Vec<Album>>;

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>>;

    async fn show_episodes(&self, show_id: &str, limit: u32) -> Res<Vec<Episode>>;

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse>;

    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTrackToPlaylistResponse>;

    async fn album(&self, album_id: &str) -> Res<GetAlbumResponse>;

    async fn track(&self, track_id: &str) -> Res<Track>;

    async fn recommendations(&self, seed_track_ids: &[String], limit: u32) -> Res<Vec<Track>>;
}

/// Authenticated Spotify Web API client.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    /// Refreshes the session once and returns a client bound to the new access token.
    pub async fn connect(settings: &SpotifySettings) -> Res<Self> {
        let refresh_token =
            TokenManager::resolve_refresh_token(settings.refresh_token.as_deref()).await?;
        let token = auth::refresh_token(settings, &refresh_token).await?;
        Ok(SpotifyClient::new(&settings.api_url, token.access_token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Res<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        read_json(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Res<T> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;
        read_json(response).await
    }
}

/// Decodes a successful response, or turns an error status into [`Error::Api`].
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Res<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    Ok(response.json::<T>().await?)
}

/// Extracts `error.message` (or `error_description`) from a Spotify error body.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    json["error"]["message"]
        .as_str()
        .or_else(|| json["error_description"].as_str())
        .or_else(|| json["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}

impl Catalog for SpotifyClient {
    async fn current_user(&self) -> Res<CurrentUser> {
        self.get_current_user().await
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        release_kinds: &ReleaseKinds,
        limit: u32,
    ) -> Res<Vec<Album>> {
        self.get_release_for_artist(artist_id, release_kinds, limit)
            .await
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        self.get_album_tracks(album_id).await
    }

    async fn show_episodes(&self, show_id: &str, limit: u32) -> Res<Vec<Episode>> {
        self.get_show_episodes(show_id, limit).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        self.create_user_playlist(user_id, name, public).await
    }

    async fn add_playlist_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTrackToPlaylistResponse> {
        self.add_tracks(playlist_id, uris).await
    }

    async fn album(&self, album_id: &str) -> Res<GetAlbumResponse> {
        self.get_album(album_id).await
    }

    async fn track(&self, track_id: &str) -> Res<Track> {
        self.get_track(track_id).await
    }

    async fn recommendations(&self, seed_track_ids: &[String], limit: u32) -> Res<Vec<Track>> {
        self.get_recommendations(seed_track_ids, limit).await
    }
}
