//! Configuration for the shelfsend binary.
//!
//! Read from `./shelfsend.ron`. A missing file means defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shelf_logging::LogDestination;
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "shelfsend.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory name under the staging root.
    pub staging_dir_name: String,
    /// Overrides the platform cache directory.
    pub staging_root: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub clear_on_exit: bool,
    pub exit_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            staging_dir_name: "shelfsend_tmp".to_string(),
            staging_root: None,
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from(shelf_logging::DEFAULT_LOG_FILE),
            clear_on_exit: true,
            exit_timeout_ms: 2_000,
        }
    }
}

impl AppConfig {
    pub fn staging_dir(&self) -> PathBuf {
        let root = self
            .staging_root
            .clone()
            .or_else(dirs::cache_dir)
            .unwrap_or_else(std::env::temp_dir);
        root.join(&self.staging_dir_name)
    }

    pub fn exit_timeout(&self) -> Duration {
        Duration::from_millis(self.exit_timeout_ms)
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
