use crate::{
    Res,
    types::{Album, AlbumResponse, GetAlbumResponse, Track, Tracks},
    utils,
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the most recent releases of an artist.
    ///
    /// Uses `/artists/{id}/albums` with `include_groups` built from
    /// `release_types` (e.g. `album,single`). At most `limit` releases
    /// (1-50) are returned, newest first as ordered by Spotify.
    pub async fn get_release_for_artist(
        &self,
        artist_id: &str,
        release_types: &utils::ReleaseKinds,
        limit: u32,
    ) -> Res<Vec<Album>> {
        let path = format!(
            "/artists/{id}/albums?include_groups={include_groups}&limit={limit}",
            id = artist_id,
            include_groups = release_types,
            limit = limit
        );

        let json = self.get_json::<AlbumResponse>(&path).await?;
        Ok(json.items)
    }

    /// Retrieves the track listing of a release (first 50 tracks).
    pub async fn get_album_tracks(&self, album_id: &str) -> Res<Vec<Track>> {
        let path = format!("/albums/{id}/tracks?limit=50", id = album_id);
        let json = self.get_json::<Tracks>(&path).await?;
        Ok(json.items)
    }

    /// Retrieves a full album, including its canonical URL and track listing.
    pub async fn get_album(&self, album_id: &str) -> Res<GetAlbumResponse> {
        self.get_json(&format!("/albums/{id}", id = album_id)).await
    }

    pub async fn get_track(&self, track_id: &str) -> Res<Track> {
        self.get_json(&format!("/tracks/{id}", id = track_id)).await
    }
}
