use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    Res,
    error::Error,
    types::{ArchiveEntry, FollowedArtist, FollowedShow},
};

pub const ARTISTS_FILE: &str = "artists.json";
pub const PODCASTS_FILE: &str = "podcasts.json";
pub const CLASSICS_FILE: &str = "classics.json";
pub const NOTABLE_SONGS_FILE: &str = "notable_songs.json";

/// The static catalog files a run is driven by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    pub artists: Vec<FollowedArtist>,
    pub shows: Vec<FollowedShow>,
    pub classics: Vec<ArchiveEntry>,
    pub notable_songs: Vec<ArchiveEntry>,
}

impl Library {
    /// Loads every catalog file from `dir`.
    ///
    /// `artists.json` is required. The other files are optional and read as
    /// empty lists when absent, but a file that exists and cannot be parsed
    /// fails the load.
    pub async fn load(dir: &Path) -> Res<Self> {
        Ok(Library {
            artists: read_json(&dir.join(ARTISTS_FILE)).await?,
            shows: read_optional_json(&dir.join(PODCASTS_FILE)).await?,
            classics: read_optional_json(&dir.join(CLASSICS_FILE)).await?,
            notable_songs: read_optional_json(&dir.join(NOTABLE_SONGS_FILE)).await?,
        })
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Res<Vec<T>> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| Error::json(path, e))
}

async fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Res<Vec<T>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }
    read_json(path).await
}
