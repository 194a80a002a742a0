//! Editor configuration

use std::time::Duration;

/// Configuration for a [`TreeEditor`](crate::editor::TreeEditor).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use arbor_lib::EditorConfig;
///
/// let config = EditorConfig::default()
///     .with_id_prefix("item")
///     .with_load_timeout(Duration::from_secs(5));
/// assert_eq!(config.id_prefix, "item");
/// ```
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Prefix for generated node ids (`"{prefix}-{uuid}"`).
    ///
    /// Default: `"node"`
    pub id_prefix: String,

    /// Upper bound on a single lazy load. `None` waits for the fetcher
    /// indefinitely.
    ///
    /// Default: `None`
    pub load_timeout: Option<Duration>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id_prefix: "node".to_string(),
            load_timeout: None,
        }
    }
}

impl EditorConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prefix for generated node ids.
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Sets the lazy-load timeout.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Removes the lazy-load timeout.
    pub fn without_load_timeout(mut self) -> Self {
        self.load_timeout = None;
        self
    }
}
