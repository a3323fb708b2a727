use crate::{
    Res,
    types::{RecommendationsResponse, Track},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Requests `limit` tracks seeded from up to five track ids.
    pub async fn get_recommendations(&self, seed_track_ids: &[String], limit: u32) -> Res<Vec<Track>> {
        let seeds = seed_track_ids
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let path = format!(
            "/recommendations?seed_tracks={seeds}&limit={limit}",
            seeds = seeds,
            limit = limit
        );

        let json = self.get_json::<RecommendationsResponse>(&path).await?;
        Ok(json.tracks)
    }
}
