//! Settings and registry loading shared by the commands

use std::path::PathBuf;

use reposync_core::{Settings, SettingsOverrides, SettingsResolver};
use reposync_meta::Registry;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Where a command gets its settings from.
#[derive(Debug, Clone)]
pub struct Context {
    resolver: SettingsResolver,
    overrides: SettingsOverrides,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let resolver = match &cli.config {
            Some(path) => SettingsResolver::new().with_file(path),
            None => SettingsResolver::new(),
        };
        Self {
            resolver,
            overrides: cli.overrides(),
        }
    }

    /// Settings file in effect, whether or not it exists.
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.resolver.settings_path()
    }

    /// Effective settings after layering file and overrides.
    pub fn settings(&self) -> Result<Settings> {
        Ok(self.resolver.resolve(&self.overrides)?)
    }

    /// Registry read from the settings' manifest.
    pub fn registry(&self, settings: &Settings) -> Result<Registry> {
        let manifest = settings.manifest_path();
        if !manifest.is_file() {
            return Err(CliError::user(format!(
                "Manifest not found at {} (set --manifest or `manifest` in the settings file)",
                manifest.display()
            )));
        }
        tracing::debug!(manifest = %manifest.display(), "Loading registry");
        Ok(reposync_meta::load_registry(&manifest)?)
    }
}
