//! Application settings and paths.
//!
//! Settings are read from an optional JSON file in the XDG configuration
//! directory (`~/.config/portsweep/settings.json` on Linux) and only supply
//! defaults; command-line flags always win.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{DEFAULT_PROGRESS_INTERVAL, DEFAULT_THREADS, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform configuration directory.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// User-tunable defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Port range used when `--ports` is not given.
    pub default_ports: String,
    /// Worker count used when `--threads` is not given.
    pub default_threads: usize,
    /// Probe timeout in seconds used when `--timeout` is not given.
    pub default_timeout_secs: f64,
    /// Milliseconds between progress redraws.
    pub progress_interval_ms: u64,
    /// Colored terminal output.
    pub color: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_ports: "1-1024".to_string(),
            default_threads: DEFAULT_THREADS,
            default_timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            progress_interval_ms: DEFAULT_PROGRESS_INTERVAL.as_millis() as u64,
            color: true,
        }
    }
}

impl AppSettings {
    /// Load settings from `custom` if given, else from the default location.
    ///
    /// A missing default file yields the built-in defaults; a missing custom
    /// file is an error.
    pub fn load(custom: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = custom {
            return Self::load_from(path);
        }

        let file = match Paths::discover() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                debug!(error = %e, "no configuration directory; using defaults");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
