//! Application configuration.
//!
//! Settings live in a JSON file under the platform config directory
//! (`config.json`). Every field has a default, so a missing file or a
//! partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SUBFEED_CONFIG";

const CONFIG_FILE_NAME: &str = "config.json";
const SAVED_DB_FILE_NAME: &str = "saved_posts.db";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for [`FeedConfig`].
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// No home directory could be determined for default paths.
    #[error("could not determine a config directory for this platform")]
    NoProjectDirs,
}

/// Feed reader settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Subreddit to read.
    pub source: String,
    /// Listing sort (`top`, `hot`, `new`, ...).
    pub sort: String,
    /// Posts requested per page.
    pub page_limit: usize,
    /// Base URL of the feed API. A missing trailing slash is added.
    pub api_base_url: String,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Quiet period before a search keystroke is applied.
    pub search_debounce_ms: u64,
    /// Remaining content, in viewport heights, below which the next page is prefetched.
    pub prefetch_viewports: f32,
    /// Number of thumbnails kept in memory.
    pub thumbnail_cache_entries: usize,
    /// Terminal rows available to the post list.
    pub viewport_rows: usize,
    /// Column width used to wrap row text.
    pub wrap_width: usize,
    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: "ios".to_string(),
            sort: "top".to_string(),
            page_limit: 10,
            api_base_url: "https://www.reddit.com/".to_string(),
            user_agent: concat!("subfeed/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: 15,
            search_debounce_ms: 300,
            prefetch_viewports: 2.0,
            thumbnail_cache_entries: 64,
            viewport_rows: 24,
            wrap_width: 72,
            data_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl FeedConfig {
    /// Loads the config from `path`, falling back to defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads from `$SUBFEED_CONFIG` or the platform default location.
    pub fn load_default() -> Result<(Self, PathBuf), ConfigError> {
        let path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => project_dirs()?.config_dir().join(CONFIG_FILE_NAME),
        };
        let config = Self::load(&path)?;
        Ok((config, path))
    }

    /// Directory holding the saved-posts database.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    /// Full path of the saved-posts database.
    pub fn saved_db_path(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(SAVED_DB_FILE_NAME))
    }

    /// Search debounce interval.
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// HTTP request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("dev", "subfeed", "subfeed").ok_or(ConfigError::NoProjectDirs)
}
