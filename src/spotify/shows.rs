use crate::{
    Res,
    types::{Episode, EpisodeResponse},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Retrieves the latest episodes of a show.
    ///
    /// Episodes Spotify reports as `null` (unavailable in the account's
    /// market) are dropped.
    pub async fn get_show_episodes(&self, show_id: &str, limit: u32) -> Res<Vec<Episode>> {
        let path = format!(
            "/shows/{id}/episodes?limit={limit}",
            id = show_id,
            limit = limit
        );

        let json = self.get_json::<EpisodeResponse>(&path).await?;
        Ok(json.items.into_iter().flatten().collect())
    }
}
