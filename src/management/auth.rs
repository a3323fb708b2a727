use std::path::PathBuf;

use crate::{Res, config, error::Error, types::Token};

/// Token obtained by `hebdo auth`, cached on disk between runs.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Res<Self> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        let token: Token = serde_json::from_str(&content).map_err(|e| Error::json(&path, e))?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Res<()> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| Error::json(&path, e))?;
        async_fs::write(&path, json)
            .await
            .map_err(|e| Error::io(&path, e))
    }

    /// Refresh token to start a run with: the configured one wins over the cache.
    pub async fn resolve_refresh_token(configured: Option<&str>) -> Res<String> {
        if let Some(token) = configured {
            return Ok(token.to_string());
        }

        match Self::load().await {
            Ok(manager) if !manager.token.refresh_token.is_empty() => {
                Ok(manager.token.refresh_token)
            }
            _ => Err(Error::Auth(
                "no refresh token configured. Set SPOTIFY_REFRESH_TOKEN or run hebdo auth"
                    .to_string(),
            )),
        }
    }

    pub fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
