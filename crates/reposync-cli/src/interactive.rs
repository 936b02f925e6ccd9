//! Interactive repository picker
//!
//! Uses dialoguer for terminal input. Selection itself stays in
//! [`Registry::select`]; this module only prompts and reports.

use colored::Colorize;
use dialoguer::Input;
use reposync_meta::Registry;

use crate::commands::list::print_registry;
use crate::error::Result;

/// Prompt for repositories until a blank line.
///
/// Unknown names or numbers are reported and the prompt repeats. Each
/// repository is returned once, in the order picked.
pub fn pick_repositories(registry: &Registry) -> Result<Vec<String>> {
    print_registry(registry);
    println!();

    let mut picked: Vec<String> = Vec::new();
    loop {
        let input: String = Input::new()
            .with_prompt("Repository (name or number, empty to finish)")
            .allow_empty(true)
            .interact_text()?;

        let token = input.trim();
        if token.is_empty() {
            break;
        }

        match registry.select(token) {
            Ok(id) if picked.iter().any(|name| name == id.as_str()) => {
                println!("  {} {} already selected", "=".dimmed(), id);
            }
            Ok(id) => {
                println!("  {} {}", "+".green(), id);
                picked.push(id.as_str().to_string());
            }
            Err(e) => {
                eprintln!("  {} {}", "warning:".yellow().bold(), e);
            }
        }
    }

    Ok(picked)
}
