use crate::{Res, config::SpotifySettings, spotify};

/// One-time authorization. Prints the refresh token for `SPOTIFY_REFRESH_TOKEN`.
pub async fn auth() -> Res<()> {
    let settings = SpotifySettings::from_env()?;
    spotify::auth::auth(settings).await?;
    Ok(())
}
