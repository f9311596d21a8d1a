//! Tool configuration and the application-data directory

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ToolError};

/// Directory name under the platform data directory
pub const APP_NAME: &str = "GodotPCKExplorer";
/// Config file name inside the application-data directory
pub const CONFIG_FILE: &str = "config.json";
/// Default log file name inside the application-data directory
pub const LOG_FILE: &str = "log.txt";

pub const ENV_HOME: &str = "GODOT_PCK_EXPLORER_HOME";
pub const ENV_BACKEND: &str = "GODOT_PCK_BACKEND";
pub const ENV_BROWSER: &str = "GODOT_PCK_BROWSER";
pub const ENV_LOG_FILE: &str = "GODOT_PCK_LOG_FILE";
pub const ENV_LOG_FILTER: &str = "GODOT_PCK_LOG";

/// Settings read from `config.json`, overridable from the environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable implementing the PCK codec
    pub backend: Option<PathBuf>,
    /// Executable of the interactive archive browser
    pub browser: Option<PathBuf>,
    /// Log file; defaults to `log.txt` in the application-data directory
    pub log_file: Option<PathBuf>,
    /// Tracing filter used when the environment sets none
    pub log_filter: Option<String>,
}

impl ToolConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `config.json` from `app_dir` (if present) and apply environment overrides
    pub fn load(app_dir: &Path) -> Result<Self> {
        let config = Self::from_file(&app_dir.join(CONFIG_FILE))?;
        Ok(config.with_env_overrides(|key| std::env::var_os(key).map(PathBuf::from)))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match fs_err::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ToolError::invalid_config(format!(
                    "{}: {}",
                    path.display(),
                    e
                )));
            }
        };
        serde_json::from_str(&text).map_err(|e| {
            ToolError::invalid_config(format!("{}: {}", path.display(), e))
        })
    }

    /// Apply overrides from a variable lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        if let Some(backend) = lookup(ENV_BACKEND) {
            self.backend = Some(backend);
        }
        if let Some(browser) = lookup(ENV_BROWSER) {
            self.browser = Some(browser);
        }
        if let Some(log_file) = lookup(ENV_LOG_FILE) {
            self.log_file = Some(log_file);
        }
        self
    }

    /// Set the backend executable
    pub fn with_backend<P: Into<PathBuf>>(mut self, backend: P) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Set the browser executable
    pub fn with_browser<P: Into<PathBuf>>(mut self, browser: P) -> Self {
        self.browser = Some(browser.into());
        self
    }

    /// Set the log file
    pub fn with_log_file<P: Into<PathBuf>>(mut self, log_file: P) -> Self {
        self.log_file = Some(log_file.into());
        self
    }

    /// Log file to use, relative paths resolved against `app_dir`
    pub fn log_path(&self, app_dir: &Path) -> PathBuf {
        match &self.log_file {
            Some(path) => app_dir.join(path),
            None => app_dir.join(LOG_FILE),
        }
    }
}

/// Locate the application-data directory
pub fn app_data_dir() -> PathBuf {
    app_data_dir_from(|key| std::env::var_os(key).map(PathBuf::from))
}

/// Locate the application-data directory using `lookup` for environment variables
pub fn app_data_dir_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let non_empty = |key: &str| lookup(key).filter(|p| !p.as_os_str().is_empty());

    if let Some(home) = non_empty(ENV_HOME) {
        return home;
    }
    if cfg!(windows) {
        if let Some(appdata) = non_empty("APPDATA") {
            return appdata.join(APP_NAME);
        }
    }
    if let Some(data) = non_empty("XDG_DATA_HOME") {
        return data.join(APP_NAME);
    }
    if let Some(home) = non_empty("HOME") {
        return home.join(".local").join("share").join(APP_NAME);
    }
    PathBuf::from(APP_NAME)
}

/// Create the application-data directory if it is missing
pub fn ensure_app_data_dir(dir: &Path) -> Result<()> {
    fs_err::create_dir_all(dir)
        .map_err(|e| ToolError::io_error(format!("Failed to create {}: {}", dir.display(), e)))
}
