//! Annotation lookups used to give archive entries some context.
//!
//! Lookups are best effort: `Ok(None)` means the service had nothing that
//! matches, which is a normal outcome. Errors are reported to the caller,
//! which drops the enrichment for that entry.

use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{Res, config::GeniusSettings, error::Error, types::ContextualInfo};

const MAX_FACTS: usize = 3;

/// Descriptive context about songs and artists.
#[allow(async_fn_in_trait)]
pub trait Annotations {
    async fn search_song(&self, title: &str, artist: &str) -> Res<Option<ContextualInfo>>;

    async fn search_artist(&self, name: &str) -> Res<Option<ContextualInfo>>;
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    result: SongSummary,
}

#[derive(Debug, Deserialize)]
struct SongSummary {
    id: u64,
    #[serde(default)]
    title: String,
    primary_artist: ArtistSummary,
}

#[derive(Debug, Deserialize)]
struct ArtistSummary {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SongResponse {
    song: SongDetails,
}

#[derive(Debug, Deserialize)]
struct SongDetails {
    url: String,
    #[serde(default)]
    release_date_for_display: Option<String>,
    #[serde(default)]
    description: Option<Description>,
    #[serde(default)]
    album: Option<AlbumSummary>,
}

#[derive(Debug, Deserialize)]
struct AlbumSummary {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArtistResponse {
    artist: ArtistDetails,
}

#[derive(Debug, Deserialize)]
struct ArtistDetails {
    url: String,
    #[serde(default)]
    description: Option<Description>,
}

#[derive(Debug, Deserialize)]
struct Description {
    #[serde(default)]
    plain: String,
}

/// Genius API client.
pub struct GeniusClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl GeniusClient {
    pub fn new(settings: &GeniusSettings) -> Self {
        GeniusClient {
            http: Client::new(),
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            access_token: settings.access_token.clone(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Res<T> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let envelope = response.json::<Envelope<T>>().await?;
        Ok(envelope.response)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Res<Url> {
        Url::parse_with_params(&format!("{}{}", self.api_url, path), params)
            .map_err(|e| Error::Config(format!("invalid Genius URL: {}", e)))
    }

    async fn search(&self, query: &str) -> Res<Vec<SongSummary>> {
        let url = self.endpoint("/search", &[("q", query)])?;
        let response = self.get::<SearchResponse>(url).await?;
        Ok(response.hits.into_iter().map(|hit| hit.result).collect())
    }
}

impl Annotations for GeniusClient {
    async fn search_song(&self, title: &str, artist: &str) -> Res<Option<ContextualInfo>> {
        let hits = self.search(&format!("{} {}", title, artist)).await?;
        let Some(hit) = hits.into_iter().find(|hit| {
            same_name(&hit.primary_artist.name, artist) && same_name(&hit.title, title)
        }) else {
            return Ok(None);
        };

        let url = self.endpoint(&format!("/songs/{}", hit.id), &[("text_format", "plain")])?;
        let song = self.get::<SongResponse>(url).await?.song;

        let description = song.description.map(|d| d.plain).unwrap_or_default();
        let mut facts = extract_facts(&description, MAX_FACTS);
        if let Some(album) = song.album {
            facts.push(format!("Album : {}", album.name));
        }

        Ok(Some(ContextualInfo {
            url: song.url,
            description: first_paragraph(&description),
            release_date_text: song.release_date_for_display,
            facts,
        }))
    }

    async fn search_artist(&self, name: &str) -> Res<Option<ContextualInfo>> {
        let hits = self.search(name).await?;
        let Some(artist_id) = hits
            .into_iter()
            .map(|hit| hit.primary_artist)
            .find(|artist| same_name(&artist.name, name))
            .map(|artist| artist.id)
        else {
            return Ok(None);
        };

        let url = self.endpoint(&format!("/artists/{}", artist_id), &[("text_format", "plain")])?;
        let artist = self.get::<ArtistResponse>(url).await?.artist;
        let description = artist.description.map(|d| d.plain).unwrap_or_default();

        Ok(Some(ContextualInfo {
            url: artist.url,
            description: first_paragraph(&description),
            release_date_text: None,
            facts: extract_facts(&description, MAX_FACTS),
        }))
    }
}

/// Loose title comparison: case-insensitive, one side may contain the other.
fn same_name(found: &str, wanted: &str) -> bool {
    let found = found.trim().to_lowercase();
    let wanted = wanted.trim().to_lowercase();
    !found.is_empty() && (found.contains(&wanted) || wanted.contains(&found))
}

/// First paragraph of a plain-text description. Genius uses `?` for "none".
pub fn first_paragraph(text: &str) -> String {
    let paragraph = text.split("\n\n").next().unwrap_or_default().trim();
    if paragraph == "?" {
        String::new()
    } else {
        paragraph.to_string()
    }
}

/// Splits a description into at most `max` sentences.
pub fn extract_facts(text: &str, max: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || text == "?" {
        return Vec::new();
    }

    let mut facts = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(if c == '\n' { ' ' } else { c });
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_none_or(|next| next.is_whitespace());
        if at_boundary {
            let sentence = current.trim().to_string();
            if sentence.len() > 1 {
                facts.push(sentence);
            }
            current.clear();
            if facts.len() == max {
                return facts;
            }
        }
    }

    let rest = current.trim();
    if !rest.is_empty() && facts.len() < max {
        facts.push(rest.to_string());
    }
    facts
}
