//! Configuration management for the weekly digest.
//!
//! This module loads configuration values from environment variables and an
//! optional `.env` file, and gathers them into a single [`Settings`] value that
//! is built once at process start and handed to every component.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{
    Res,
    error::Error,
    utils::{self, ReleaseKinds},
};

const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-modify-private playlist-modify-public";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";
const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_SMTP_PORT: u16 = 587;

/// Returns `<data_local_dir>/hebdo`, the home of `.env`, the token cache and
/// the default catalog files.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("hebdo");
    path
}

/// Loads environment variables from `<data_local_dir>/hebdo/.env`.
///
/// The directory is created if needed. A missing `.env` file is not an
/// error since every value may also come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/hebdo/.env`
/// - macOS: `~/Library/Application Support/hebdo/.env`
/// - Windows: `%LOCALAPPDATA%/hebdo/.env`
pub async fn load_env() -> Res<()> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::io(&dir, e))?;

    let path = dir.join(".env");
    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| Error::Config(format!("cannot load {}: {}", path.display(), e)))?;
    }
    Ok(())
}

/// How podcast episodes found in the window are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodcastMode {
    /// Every episode of the week is listed and added to the playlist.
    All,
    /// Only the most recent episode per show is listed; none are added to the playlist.
    Latest,
}

impl PodcastMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(PodcastMode::All),
            "latest" => Some(PodcastMode::Latest),
            _ => None,
        }
    }
}

/// Optional parts of the digest pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Features {
    pub include_podcasts: bool,
    pub include_recommendations: bool,
    pub include_archive: bool,
    pub include_annotations: bool,
    pub html_email: bool,
    pub podcast_mode: PodcastMode,
    pub release_kinds: ReleaseKinds,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            include_podcasts: true,
            include_recommendations: true,
            include_archive: true,
            include_annotations: true,
            html_email: true,
            podcast_mode: PodcastMode::Latest,
            release_kinds: ReleaseKinds::default(),
        }
    }
}

impl Features {
    pub fn from_env() -> Res<Self> {
        let defaults = Features::default();
        let podcast_mode = match optional("HEBDO_PODCAST_MODE") {
            Some(value) => PodcastMode::parse(&value).ok_or(Error::InvalidEnv {
                name: "HEBDO_PODCAST_MODE",
                value,
            })?,
            None => defaults.podcast_mode,
        };
        let release_kinds = match optional("HEBDO_RELEASE_TYPES") {
            Some(value) => utils::parse_release_kinds(&value).map_err(|_| Error::InvalidEnv {
                name: "HEBDO_RELEASE_TYPES",
                value,
            })?,
            None => defaults.release_kinds,
        };

        Ok(Features {
            include_podcasts: flag("HEBDO_INCLUDE_PODCASTS", defaults.include_podcasts)?,
            include_recommendations: flag(
                "HEBDO_INCLUDE_RECOMMENDATIONS",
                defaults.include_recommendations,
            )?,
            include_archive: flag("HEBDO_INCLUDE_ARCHIVE", defaults.include_archive)?,
            include_annotations: flag("HEBDO_INCLUDE_ANNOTATIONS", defaults.include_annotations)?,
            html_email: flag("HEBDO_HTML_EMAIL", defaults.html_email)?,
            podcast_mode,
            release_kinds,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub api_url: String,
    pub token_url: String,
    pub auth_url: String,
    pub redirect_uri: String,
    pub scope: String,
    pub server_address: String,
}

impl SpotifySettings {
    pub fn from_env() -> Res<Self> {
        Ok(SpotifySettings {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: optional("SPOTIFY_API_AUTH_CLIENT_SECRET"),
            refresh_token: optional("SPOTIFY_REFRESH_TOKEN"),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
            auth_url: or_default("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
            redirect_uri: or_default("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI),
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeniusSettings {
    pub access_token: String,
    pub api_url: String,
}

impl GeniusSettings {
    /// `None` when no access token is configured.
    pub fn from_env() -> Option<Self> {
        optional("GENIUS_ACCESS_TOKEN").map(|access_token| GeniusSettings {
            access_token,
            api_url: or_default("GENIUS_API_URL", DEFAULT_GENIUS_API_URL),
        })
    }
}

#[derive(Debug, Clone)]
pub struct MailSettings {
    pub user: String,
    pub password: String,
    pub to: String,
    pub host: String,
    pub port: u16,
}

impl MailSettings {
    pub fn from_env() -> Res<Self> {
        let port = match optional("SMTP_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| Error::InvalidEnv {
                name: "SMTP_PORT",
                value,
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(MailSettings {
            user: required("EMAIL_USER")?,
            password: required("EMAIL_PASSWORD")?,
            to: required("EMAIL_TO")?,
            host: or_default("SMTP_HOST", DEFAULT_SMTP_HOST),
            port,
        })
    }
}

/// Everything a digest run needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub genius: Option<GeniusSettings>,
    /// Present only when the digest is going to be mailed.
    pub mail: Option<MailSettings>,
    pub catalog_dir: PathBuf,
    pub features: Features,
}

impl Settings {
    /// Reads the run settings. `send_email` overrides `SEND_EMAIL` when given.
    pub fn from_env(send_email: Option<bool>, catalog_dir: Option<PathBuf>) -> Res<Self> {
        let send_email = match send_email {
            Some(send) => send,
            None => flag("SEND_EMAIL", true)?,
        };
        let mail = if send_email {
            Some(MailSettings::from_env()?)
        } else {
            None
        };
        let catalog_dir = catalog_dir
            .or_else(|| optional("HEBDO_CATALOG_DIR").map(PathBuf::from))
            .unwrap_or_else(data_dir);

        Ok(Settings {
            spotify: SpotifySettings::from_env()?,
            genius: GeniusSettings::from_env(),
            mail,
            catalog_dir,
            features: Features::from_env()?,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn required(name: &'static str) -> Res<String> {
    optional(name).ok_or(Error::MissingEnv(name))
}

fn or_default(name: &str, default: &str) -> String {
    optional(name).unwrap_or_else(|| default.to_string())
}

fn flag(name: &'static str, default: bool) -> Res<bool> {
    match optional(name) {
        Some(value) => utils::parse_flag(&value).ok_or(Error::InvalidEnv { name, value }),
        None => Ok(default),
    }
}
