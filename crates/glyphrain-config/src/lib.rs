//! Settings file handling for glyphrain.
//!
//! Settings live in a TOML file under the platform config directory
//! (`~/.config/glyphrain/config.toml` on Linux). A file that is missing,
//! unreadable, malformed or out of range is never applied partially: the
//! caller gets either a fully valid [`Settings`] or an error and defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use glyphrain_core::{Settings, SettingsError};

const APP_NAME: &str = "glyphrain";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "glyphrain.log";

/// Failure to load or save the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no config directory available on this platform")]
    NoConfigDir,
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings in {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: SettingsError,
    },
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Default location of the debug log file.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
}

/// Reads and writes one settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store backed by an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform config location.
    pub fn default_location() -> Result<Self, ConfigError> {
        project_dirs()
            .map(|dirs| Self::new(dirs.config_dir().join(CONFIG_FILE)))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the file. A missing file yields the defaults.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, using defaults", self.path.display());
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let settings: Settings = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        settings.validate().map_err(|source| ConfigError::Invalid {
            path: self.path.clone(),
            source,
        })?;
        log::info!("loaded settings from {}", self.path.display());
        Ok(settings)
    }

    /// Like [`ConfigStore::load`], falling back to defaults on any error.
    pub fn load_or_default(&self) -> (Settings, Option<ConfigError>) {
        match self.load() {
            Ok(settings) => (settings, None),
            Err(e) => {
                log::warn!("{e}; using default settings");
                (Settings::default(), Some(e))
            }
        }
    }

    /// Write the settings, creating parent directories as needed.
    pub fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(settings)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("nested").join(CONFIG_FILE))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let settings = Settings {
            columns: 120,
            rows: 40,
            speed: 0.05,
            duration: Some(90.0),
            fade_enabled: false,
            ..Default::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_unset_duration_is_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Settings::default()).unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(!text.contains("duration"));
        assert!(text.contains("columns = 80"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        fs::write(store.path(), "rows = 50\nbold_enabled = false\n").unwrap();
        let settings = store.load().unwrap();
        assert_eq!(settings.rows, 50);
        assert!(!settings.bold_enabled);
        assert_eq!(settings.columns, 80);
    }

    #[test]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        fs::write(store.path(), "rows = \"many\"\ncolumns = 150\n").unwrap();
        let (settings, err) = store.load_or_default();
        assert_eq!(settings, Settings::default());
        assert!(matches!(err, Some(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_out_of_range_file_is_rejected_whole() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join(CONFIG_FILE));
        fs::write(store.path(), "columns = 150\nspeed = 3.0\n").unwrap();
        let (settings, err) = store.load_or_default();
        assert_eq!(settings, Settings::default());
        assert!(matches!(err, Some(ConfigError::Invalid { .. })));
    }
}
