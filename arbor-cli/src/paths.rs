//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "arbor";
const APPLICATION: &str = "arbor";

/// Name of the log file written by the current run.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of archived log files to keep.
const MAX_OLD_LOGS: usize = 25;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Directory for the default tree file.
///
/// - Linux: `$XDG_DATA_HOME/arbor` or `~/.local/share/arbor`
/// - macOS: `~/Library/Application Support/dev.arbor.arbor`
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/arbor` or `~/.cache/arbor`
/// - macOS: `~/Library/Caches/dev.arbor.arbor`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding `config.toml`.
///
/// - Linux: `$XDG_CONFIG_HOME/arbor` or `~/.config/arbor`
/// - macOS: `~/Library/Application Support/dev.arbor.arbor`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default location of the tree file.
pub fn tree_file() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("tree.json"))
}

/// Default location of the configuration file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Path of the log file for this run.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archives the previous run's log under a timestamped name and prunes old
/// archives.
///
/// Call at startup, before the new log file is created.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let _ = fs::rename(&latest, dir.join(format!("{}.log", stamp)));
    }
    prune_old_logs(dir, MAX_OLD_LOGS);
}

/// Removes the oldest archived logs beyond `keep`.
fn prune_old_logs(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archived: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    if archived.len() <= keep {
        return;
    }

    archived.sort_by_key(|entry| entry.metadata().and_then(|m| m.modified()).ok());
    for entry in archived.iter().take(archived.len() - keep) {
        let _ = fs::remove_file(entry.path());
    }
}
