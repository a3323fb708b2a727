use crate::{
    Res,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser,
    },
};

use super::SpotifyClient;

impl SpotifyClient {
    pub async fn get_current_user(&self) -> Res<CurrentUser> {
        self.get_json("/me").await
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn create_user_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Sorties de la semaine des artistes suivis.".to_string(),
            public,
            collaborative: false,
        };

        self.post_json(&format!("/users/{user_id}/playlists"), &body)
            .await
    }

    /// Appends items to a playlist. Spotify accepts at most 100 URIs per call.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTrackToPlaylistResponse> {
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        self.post_json(&format!("/playlists/{playlist_id}/tracks"), &body)
            .await
    }
}
