#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use hebdo::{
    Res,
    error::Error,
    genius::Annotations,
    mailer::Mailer,
    spotify::Catalog,
    types::{
        AddTrackToPlaylistResponse, Album, AlbumArtist, ArchiveEntry, ContextualInfo,
        CreatePlaylistResponse, CurrentUser, Episode, ExternalUrls, GetAlbumResponse, Report,
        Track, Tracks, Year,
    },
    utils::ReleaseKinds,
};

fn api_error(message: &str) -> Error {
    Error::Api {
        status: 500,
        message: message.to_string(),
    }
}

pub fn track(id: &str, name: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: vec![AlbumArtist {
            id: String::new(),
            name: artist.to_string(),
        }],
        external_urls: ExternalUrls {
            spotify: Some(format!("https://open.spotify.com/track/{}", id)),
        },
    }
}

pub fn album(id: &str, name: &str, release_date: &str, album_type: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        release_date: release_date.to_string(),
        release_date_precision: "day".to_string(),
        album_type: album_type.to_string(),
        artists: Vec::new(),
    }
}

pub fn episode(id: &str, name: &str, release_date: Option<&str>) -> Episode {
    Episode {
        id: id.to_string(),
        name: name.to_string(),
        release_date: release_date.map(str::to_string),
        uri: Some(format!("spotify:episode:{}", id)),
    }
}

pub fn archive_entry(title: &str, artist: &str, id: &str) -> ArchiveEntry {
    ArchiveEntry {
        title: title.to_string(),
        artist: artist.to_string(),
        year: Some(Year::Number(1997)),
        reference_id: id.to_string(),
    }
}

/// In-memory catalog that records the calls made against it.
#[derive(Default)]
pub struct FakeCatalog {
    pub albums: HashMap<String, Vec<Album>>,
    pub album_tracks: HashMap<String, Vec<Track>>,
    pub episodes: HashMap<String, Vec<Episode>>,
    pub full_albums: HashMap<String, GetAlbumResponse>,
    pub tracks: HashMap<String, Track>,
    pub recommended: Vec<Track>,
    pub failing: HashSet<String>,
    pub fail_recommendations: bool,
    pub fail_create: bool,

    pub artist_calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<(String, String, bool)>>,
    pub added: Mutex<Vec<Vec<String>>>,
    pub seeds: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn with_artist(mut self, artist_id: &str, albums: Vec<Album>) -> Self {
        self.albums.insert(artist_id.to_string(), albums);
        self
    }

    pub fn with_tracks(mut self, album_id: &str, tracks: Vec<Track>) -> Self {
        self.album_tracks.insert(album_id.to_string(), tracks);
        self
    }

    pub fn with_episodes(mut self, show_id: &str, episodes: Vec<Episode>) -> Self {
        self.episodes.insert(show_id.to_string(), episodes);
        self
    }

    pub fn with_full_album(mut self, id: &str, name: &str, tracks: Vec<Track>) -> Self {
        self.full_albums.insert(
            id.to_string(),
            GetAlbumResponse {
                id: id.to_string(),
                name: name.to_string(),
                release_date: "1997-05-21".to_string(),
                artists: Vec::new(),
                external_urls: ExternalUrls {
                    spotify: Some(format!("https://open.spotify.com/album/{}", id)),
                },
                tracks: Tracks { items: tracks },
            },
        );
        self
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.insert(track.id.clone(), track);
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn added_uris(&self) -> Vec<String> {
        self.added.lock().unwrap().iter().flatten().cloned().collect()
    }

    fn check(&self, id: &str) -> Res<()> {
        if self.failing.contains(id) {
            return Err(api_error(&format!("lookup of {} failed", id)));
        }
        Ok(())
    }
}

impl Catalog for FakeCatalog {
    async fn current_user(&self) -> Res<CurrentUser> {
        Ok(CurrentUser {
            id: "listener".to_string(),
            display_name: Some("Listener".to_string()),
        })
    }

    async fn artist_albums(
        &self,
        artist_id: &str,
        _release_kinds: &ReleaseKinds,
        _limit: u32,
    ) -> Res<Vec<Album>> {
        self.artist_calls.lock().unwrap().push(artist_id.to_string());
        self.check(artist_id)?;
        Ok(self.albums.get(artist_id).cloned().unwrap_or_default())
    }

    async fn album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        self.check(album_id)?;
        Ok(self.album_tracks.get(album_id).cloned().unwrap_or_default())
    }

    async fn show_episodes(&self, show_id: &str, _limit: u32) -> Res<Vec<Episode>> {
        self.check(show_id)?;
        Ok(self.episodes.get(show_id).cloned().unwrap_or_default())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        if self.fail_create {
            return Err(api_error("playlist creation refused"));
        }
        self.created
            .lock()
            .unwrap()
            .push((user_id.to_string(), name.to_string(), public));
        Ok(CreatePlaylistResponse {
            id: "pl1".to_string(),
            name: name.to_string(),
            external_urls: None,
        })
    }

    async fn add_playlist_items(
        &self,
        _playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTrackToPlaylistResponse> {
        self.added.lock().unwrap().push(uris.to_vec());
        Ok(AddTrackToPlaylistResponse {
            snapshot_id: "snap".to_string(),
        })
    }

    async fn album(&self, album_id: &str) -> Res<GetAlbumResponse> {
        self.check(album_id)?;
        self.full_albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| api_error("album not found"))
    }

    async fn track(&self, track_id: &str) -> Res<Track> {
        self.check(track_id)?;
        self.tracks
            .get(track_id)
            .cloned()
            .ok_or_else(|| api_error("track not found"))
    }

    async fn recommendations(&self, seed_track_ids: &[String], _limit: u32) -> Res<Vec<Track>> {
        self.seeds.lock().unwrap().push(seed_track_ids.to_vec());
        if self.fail_recommendations {
            return Err(api_error("recommendations unavailable"));
        }
        Ok(self.recommended.clone())
    }
}

/// Annotation service answering every lookup with a fixed description.
#[derive(Default)]
pub struct FakeAnnotations {
    pub fail: bool,
    pub songs: Mutex<Vec<(String, String)>>,
    pub artists: Mutex<Vec<String>>,
}

impl Annotations for FakeAnnotations {
    async fn search_song(&self, title: &str, artist: &str) -> Res<Option<ContextualInfo>> {
        self.songs
            .lock()
            .unwrap()
            .push((title.to_string(), artist.to_string()));
        if self.fail {
            return Err(api_error("annotations unavailable"));
        }
        Ok(Some(ContextualInfo {
            url: format!("https://genius.com/{}", title.replace(' ', "-")),
            description: format!("About {}", title),
            release_date_text: Some("1997".to_string()),
            facts: vec!["Recorded in a mansion".to_string()],
        }))
    }

    async fn search_artist(&self, name: &str) -> Res<Option<ContextualInfo>> {
        self.artists.lock().unwrap().push(name.to_string());
        if self.fail {
            return Err(api_error("annotations unavailable"));
        }
        Ok(Some(ContextualInfo {
            url: format!("https://genius.com/artists/{}", name.replace(' ', "-")),
            description: format!("About {}", name),
            release_date_text: None,
            facts: Vec::new(),
        }))
    }
}

/// Mailer that keeps the reports it was asked to send.
#[derive(Default)]
pub struct FakeMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<Report>>,
}

impl Mailer for FakeMailer {
    async fn send(&self, report: &Report) -> Res<()> {
        if self.fail {
            return Err(Error::Mail("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(report.clone());
        Ok(())
    }
}
