//! `config.toml` loading.
//!
//! Every field is optional; a missing file means all defaults.
//!
//! ```toml
//! log_level = "info"
//!
//! [editor]
//! id_prefix = "node"
//! load_timeout_ms = 5000
//!
//! [mock]
//! delay_ms = 800
//! child_count = 2
//! max_depth = 3
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use arbor_lib::EditorConfig;
use arbor_lib::lazy::MockFetcher;
use log::LevelFilter;
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log level name (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    pub editor: EditorSection,
    pub mock: MockSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorSection {
    pub id_prefix: Option<String>,
    pub load_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MockSection {
    pub delay_ms: Option<u64>,
    pub child_count: Option<usize>,
    pub max_depth: Option<usize>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            editor: EditorSection::default(),
            mock: MockSection::default(),
        }
    }
}

impl CliConfig {
    /// Reads `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, CliError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| CliError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn editor_config(&self) -> EditorConfig {
        let mut config = EditorConfig::default();
        if let Some(prefix) = &self.editor.id_prefix {
            config = config.with_id_prefix(prefix.clone());
        }
        if let Some(ms) = self.editor.load_timeout_ms {
            config = config.with_load_timeout(Duration::from_millis(ms));
        }
        config
    }

    pub fn mock_fetcher(&self) -> MockFetcher {
        let mut fetcher = MockFetcher::new();
        if let Some(ms) = self.mock.delay_ms {
            fetcher = fetcher.with_delay(Duration::from_millis(ms));
        }
        if let Some(count) = self.mock.child_count {
            fetcher = fetcher.with_child_count(count);
        }
        if let Some(depth) = self.mock.max_depth {
            fetcher = fetcher.with_max_depth(depth);
        }
        fetcher
    }
}
