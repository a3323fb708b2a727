use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, scanning, publishing or mailing a digest.
#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} must be set")]
    MissingEnv(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("invalid email address: {0}")]
    Address(String),

    #[error("mail delivery failed: {0}")]
    Mail(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
