//! Settings display and initialisation

use colored::Colorize;
use reposync_core::Settings;
use reposync_fs::ConfigStore;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Print the effective settings
pub fn run_config_show(ctx: &Context, json: bool) -> Result<()> {
    let settings = ctx.settings()?;

    if json {
        let output = serde_json::json!({
            "settings_file": ctx.settings_path(),
            "settings": settings,
            "manifest": settings.manifest_path(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    match ctx.settings_path() {
        Some(path) if path.is_file() => {
            println!("{} {}", "# Settings file:".dimmed(), path.display());
        }
        Some(path) => {
            println!(
                "{} {} {}",
                "# Settings file:".dimmed(),
                path.display(),
                "(not present, defaults)".dimmed()
            );
        }
        None => println!("{}", "# No settings file location, defaults".dimmed()),
    }
    println!(
        "{} {}",
        "# Manifest:".dimmed(),
        settings.manifest_path().display()
    );
    println!();

    let rendered = toml::to_string_pretty(&settings)
        .map_err(|e| CliError::user(format!("Could not render settings: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Write a default settings file
pub fn run_config_init(ctx: &Context, force: bool) -> Result<()> {
    let path = ctx
        .settings_path()
        .ok_or_else(|| CliError::user("No config directory on this platform; pass --config"))?;

    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ConfigStore::new().save(&path, &Settings::default())?;
    println!("{} Wrote {}", "OK".green().bold(), path.display());
    Ok(())
}
