//! Settings for a sync pass
//!
//! - [`Settings`]: roots, manifest location, exclusions and scan tolerance
//! - [`SettingsResolver`]: locates and loads the settings file, then applies
//!   command-line and environment overrides

mod resolver;
mod settings;

pub use resolver::{SettingsOverrides, SettingsResolver, default_settings_path};
pub use settings::{Settings, WorkspaceLayout};
