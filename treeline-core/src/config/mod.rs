//! Editor settings
//!
//! This module provides the TOML settings file for embedders: drop guard
//! policy, drop-zone geometry, snapshot autosave behavior and logging. All
//! fields carry serde defaults so a partial (or missing) file loads cleanly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::drag::{DropGuard, ZoneConfig};
use crate::tracing::TracingLevel;

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Errors that can occur loading or saving settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// I/O error reading or writing the settings file.
    #[error("I/O error: {0}")]
    Io(String),

    /// The settings file exists but does not parse.
    #[error("failed to parse settings: {0}")]
    Parse(String),

    /// The settings could not be serialized.
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Drag behavior settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Which targets are suppressed while dragging.
    pub guard: DropGuard,
    /// Rendered row height in pixels.
    pub row_height: f64,
    /// Fraction of the row height forming each edge zone.
    pub edge_ratio: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        let zones = ZoneConfig::default();
        Self {
            guard: DropGuard::default(),
            row_height: zones.row_height,
            edge_ratio: zones.edge_ratio,
        }
    }
}

impl DragSettings {
    /// Returns the zone geometry these settings describe.
    #[must_use]
    pub const fn zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            row_height: self.row_height,
            edge_ratio: self.edge_ratio,
        }
    }
}

/// Snapshot autosave settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// Whether mutation batches schedule an autosave.
    pub autosave: bool,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u64,
    /// Snapshot file path override; the platform default is used when
    /// absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            autosave: true,
            debounce_ms: 2000,
            path: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level.
    pub level: TracingLevel,
    /// Log file path; stderr is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Top-level editor settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Drag behavior.
    pub drag: DragSettings,
    /// Snapshot autosave behavior.
    pub snapshot: SnapshotSettings,
    /// Logging.
    pub logging: LoggingSettings,
}

impl EditorSettings {
    /// The default settings location under the user config directory.
    ///
    /// Returns `None` on platforms without a config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("treeline").join(SETTINGS_FILE))
    }

    /// Loads settings from a TOML file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] for read failures other than a missing
    /// file, and [`SettingsError::Parse`] for malformed content.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => return Err(SettingsError::Io(err.to_string())),
        };
        toml::from_str(&raw).map_err(|err| SettingsError::Parse(err.to_string()))
    }

    /// Saves settings as TOML, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Serialize`] if encoding fails and
    /// [`SettingsError::Io`] for filesystem failures.
    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        let encoded =
            toml::to_string_pretty(self).map_err(|err| SettingsError::Serialize(err.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| SettingsError::Io(err.to_string()))?;
        }
        std::fs::write(path, encoded).map_err(|err| SettingsError::Io(err.to_string()))
    }
}
