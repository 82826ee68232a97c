//! Settings persistence.
//!
//! Settings live in one JSON document in the platform config directory:
//! - Linux: `~/.config/mudlink/settings.json`
//! - macOS: `~/Library/Application Support/io.mudlink.mudlink/settings.json`
//! - Windows: `C:\Users\<User>\AppData\Roaming\mudlink\mudlink\config\settings.json`

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use mudlink_app::Settings;
use thiserror::Error;

const SETTINGS_FILE: &str = "settings.json";

/// Settings storage errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading, writing or creating the directory failed.
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid settings JSON.
    #[error("invalid settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings document on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform config directory, or the working directory when
    /// no home directory can be found.
    pub fn platform() -> Self {
        let path = ProjectDirs::from("io", "mudlink", "mudlink")
            .map_or_else(|| PathBuf::from("mudlink_settings.json"), |dirs| dirs.config_dir().join(SETTINGS_FILE));
        Self { path }
    }

    /// Document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed. A missing file
    /// is not an error and yields defaults.
    pub fn try_load(&self) -> Result<Settings, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Settings::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the document, falling back to defaults on any failure.
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(settings) => {
                tracing::debug!(path = %self.path.display(), "settings loaded");
                settings
            },
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "using default settings");
                Settings::default()
            },
        }
    }

    /// Write the document, creating its directory when needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}
