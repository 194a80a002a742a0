//! CLI error type

use std::path::PathBuf;

use arbor_lib::error::EditorError;
use arbor_lib::error::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tree file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
    #[error("no platform directory available; pass --file")]
    NoDefaultPath,
    #[error("{0} already exists; pass --force to overwrite")]
    AlreadyExists(PathBuf),
    #[error("tree file reuses ids: {}", .0.join(", "))]
    DuplicateIds(Vec<String>),
    #[error("no node with id '{0}'")]
    NodeNotFound(String),
    #[error("refusing to delete '{0}' without --yes")]
    NotConfirmed(String),
    #[error("drop rejected: {0}")]
    DropRejected(String),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
