use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

// ---------------------------------------------------------------------------
// Static catalog files
// ---------------------------------------------------------------------------

/// Entry of `artists.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedArtist {
    #[serde(rename = "artist", alias = "name")]
    pub name: String,
    pub id: String,
}

/// Entry of `podcasts.json`. Shows without an id are skipped at scan time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedShow {
    #[serde(rename = "podcast", alias = "name")]
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// Year of an archive entry, written either as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(i32),
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(n) => write!(f, "{n}"),
            Year::Text(s) => f.write_str(s),
        }
    }
}

/// A curated classic album or notable song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub year: Option<Year>,
    #[serde(rename = "id", alias = "referenceId", alias = "reference_id")]
    pub reference_id: String,
}

// ---------------------------------------------------------------------------
// Digest model
// ---------------------------------------------------------------------------

/// Display line and catalog URIs produced for one album or episode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseRecord {
    pub display_lines: Vec<String>,
    pub track_identifiers: Vec<String>,
}

/// A failed fetch for one followed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub source_name: String,
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_name, self.message)
    }
}

/// Descriptive context gathered from the annotation service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContextualInfo {
    pub url: String,
    pub description: String,
    pub release_date_text: Option<String>,
    pub facts: Vec<String>,
}

/// An archive entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePick {
    pub entry: ArchiveEntry,
    pub url: String,
    pub track_identifiers: Vec<String>,
    pub context: Option<ContextualInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
}

#[derive(Tabled)]
pub struct DigestTableRow {
    pub section: String,
    pub entry: String,
}

// ---------------------------------------------------------------------------
// Spotify Web API wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub items: Vec<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: String,
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAlbumResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeResponse {
    // the API returns `null` for episodes unavailable in the user's market
    pub items: Vec<Option<Episode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
