//! Settings discovery and layering
//!
//! Settings are assembled from, in increasing precedence:
//! 1. Built-in defaults ([`Settings::default`])
//! 2. The settings file: an explicit path if given, else
//!    `<config dir>/reposync/config.toml` when it exists
//! 3. [`SettingsOverrides`] from flags and environment variables

use std::path::{Path, PathBuf};

use reposync_fs::ConfigStore;
use reposync_fs::constants::{APP_DIR_NAME, SETTINGS_FILE_NAME};

use super::settings::Settings;
use crate::{Error, Result};

/// Platform settings file location:
/// - Linux: `~/.config/reposync/config.toml`
/// - macOS: `~/Library/Application Support/reposync/config.toml`
/// - Windows: `%APPDATA%\reposync\config.toml`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Values that take precedence over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub build_root: Option<PathBuf>,
    pub workspace_root: Option<PathBuf>,
    pub manifest: Option<PathBuf>,
}

impl SettingsOverrides {
    fn apply(&self, settings: &mut Settings) {
        if let Some(build_root) = &self.build_root {
            settings.build_root = build_root.clone();
        }
        if let Some(workspace_root) = &self.workspace_root {
            settings.workspace_root = workspace_root.clone();
        }
        if let Some(manifest) = &self.manifest {
            settings.manifest = Some(manifest.clone());
        }
    }
}

/// Resolves the effective [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    /// Settings file requested explicitly; must exist
    explicit: Option<PathBuf>,

    /// Override for the platform config directory (used for testing)
    config_dir_override: Option<PathBuf>,
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this settings file instead of the platform location.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Look for `reposync/config.toml` under `dir` instead of the platform
    /// config directory.
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir_override = Some(dir.into());
        self
    }

    /// The settings file that [`SettingsResolver::resolve`] would read, if any.
    pub fn settings_path(&self) -> Option<PathBuf> {
        if let Some(explicit) = &self.explicit {
            return Some(explicit.clone());
        }
        match &self.config_dir_override {
            Some(dir) => Some(dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME)),
            None => default_settings_path(),
        }
    }

    /// Load, layer and validate the settings.
    ///
    /// # Errors
    ///
    /// Fails if an explicit settings file is missing, a file cannot be
    /// parsed, or the result does not validate.
    pub fn resolve(&self, overrides: &SettingsOverrides) -> Result<Settings> {
        let mut settings = match self.settings_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(?path, "Loading settings file");
                ConfigStore::new().load::<Settings>(&path)?
            }
            Some(path) if self.explicit.is_some() => {
                return Err(Error::SettingsNotFound { path });
            }
            Some(path) => {
                tracing::debug!(?path, "No settings file, using defaults");
                Settings::default()
            }
            None => Settings::default(),
        };

        overrides.apply(&mut settings);
        settings.build_root = simplify(&settings.build_root);
        settings.workspace_root = simplify(&settings.workspace_root);
        settings.validate()?;
        Ok(settings)
    }
}

/// Canonicalize existing roots so reports show real locations; leave missing
/// ones untouched for the scanner to report.
fn simplify(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
