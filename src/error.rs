use thiserror::Error;

/// Error taxonomy for the batch pipeline.
///
/// Configuration problems are fatal and surface before any network call.
/// Upstream API-reported errors halt the current stage. Transient HTTP
/// failures are recovered close to the call site: the affected candidate or
/// entity is skipped and the batch continues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("environment variable {0} must be set and non-empty")]
    MissingApiKey(&'static str),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("news API error: {0}")]
    NewsApi(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
