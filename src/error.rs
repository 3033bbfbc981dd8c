use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the configuration, layout and action-log layers.
///
/// The spatial core (queries, mutation, sight, following) is total and never
/// returns one of these.
#[derive(Debug, Error)]
pub enum TilesError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("layout line {line}: {reason}")]
    Layout { line: usize, reason: String },

    #[error("failed to encode action log: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TilesError>;
