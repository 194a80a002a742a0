//! Lazy-load error types

use std::time::Duration;

/// Errors reported by a [`ChildFetcher`](crate::lazy::ChildFetcher).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The data source could not produce the children.
    #[error("Children unavailable: {0}")]
    Unavailable(String),

    /// The fetch did not finish within the configured timeout.
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// The load was cancelled before it finished.
    #[error("Load cancelled")]
    Cancelled,
}

impl FetchError {
    /// Creates a [`FetchError::Unavailable`] error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// A lazy load that finished with an error.
///
/// The node is left retryable: its loading flag is cleared while its
/// `has_children` hint and unloaded children are kept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Loading children of '{node_id}' failed: {source}")]
pub struct LoadError {
    /// The node whose children were requested.
    pub node_id: String,
    /// What went wrong.
    #[source]
    pub source: FetchError,
}
