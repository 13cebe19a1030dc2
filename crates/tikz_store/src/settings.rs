//! Application settings management
//!
//! Settings are stored as pretty-printed JSON. A missing file means
//! defaults; an unreadable one logs a warning and falls back to defaults.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tikz_model::{Document, Unit, DEFAULT_UNDO_LIMIT};

/// Name of the settings file inside the application data directory
pub const SETTINGS_FILE: &str = "settings.json";

/// Main application settings container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// TikZ code generation
    #[serde(default)]
    pub export: ExportSettings,
    /// Document editing
    #[serde(default)]
    pub editing: EditingSettings,
}

impl AppSettings {
    /// An empty document configured from these settings
    pub fn new_document(&self) -> Document {
        Document::with_undo_limit(self.editing.undo_limit)
    }
}

/// TikZ export settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportSettings {
    /// Digits after the decimal point in coordinates
    pub precision: usize,
    /// Spaces before each line inside the picture
    pub indent: usize,
    /// Unit coordinates are converted to
    pub unit: Unit,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            precision: 2,
            indent: 2,
            unit: Unit::Centimeter,
        }
    }
}

/// Document editing settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditingSettings {
    /// Undo steps kept per document, 0 for unlimited
    pub undo_limit: usize,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

/// Loads, caches and saves [`AppSettings`]
#[derive(Debug)]
pub struct SettingsManager {
    settings_path: PathBuf,
    current: AppSettings,
}

impl SettingsManager {
    /// Create a settings manager for an application data directory
    pub fn new(app_data_dir: PathBuf) -> Self {
        Self::with_path(app_data_dir.join(SETTINGS_FILE))
    }

    /// Create a settings manager for an explicit settings file
    pub fn with_path(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            current: AppSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    fn parse(&self, content: &str) -> AppSettings {
        match serde_json::from_str::<AppSettings>(content) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    path = %self.settings_path.display(),
                    "Failed to parse settings file, using defaults: {}",
                    e
                );
                AppSettings::default()
            }
        }
    }

    /// Load settings from disk, or defaults if the file doesn't exist
    pub async fn load(&mut self) -> Result<&AppSettings> {
        self.current = if tokio::fs::try_exists(&self.settings_path).await? {
            let content = tokio::fs::read_to_string(&self.settings_path).await?;
            self.parse(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    pub fn load_sync(&mut self) -> Result<&AppSettings> {
        self.current = if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            self.parse(&content)
        } else {
            AppSettings::default()
        };
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        tokio::fs::write(&self.settings_path, content).await?;
        tracing::debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }

    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        tracing::debug!(path = %self.settings_path.display(), "settings saved");
        Ok(())
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    /// Replace the settings and save them
    pub async fn update(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save().await
    }

    pub fn update_sync(&mut self, settings: AppSettings) -> Result<()> {
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub async fn reset(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save().await?;
        Ok(&self.current)
    }

    pub fn reset_sync(&mut self) -> Result<&AppSettings> {
        self.current = AppSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }

    /// Update only the export settings
    pub async fn update_export(&mut self, export: ExportSettings) -> Result<()> {
        self.current.export = export;
        self.save().await
    }

    /// Update only the editing settings
    pub async fn update_editing(&mut self, editing: EditingSettings) -> Result<()> {
        self.current.editing = editing;
        self.save().await
    }
}
