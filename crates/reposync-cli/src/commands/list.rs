//! Repository listing

use colored::Colorize;
use reposync_fs::RelPath;
use reposync_meta::Registry;
use serde::Serialize;

use crate::context::Context;
use crate::error::Result;

#[derive(Serialize)]
struct ListedRepository<'a> {
    index: usize,
    name: &'a str,
    path: &'a RelPath,
}

/// Print the registry as `index  name -> path`.
pub fn print_registry(registry: &Registry) {
    if registry.is_empty() {
        println!("{}", "No repositories in manifest".dimmed());
        return;
    }
    let width = registry.list().iter().map(|name| name.len()).max().unwrap_or(0);
    for (index, entry) in registry.entries().iter().enumerate() {
        println!(
            "  {:>3}  {:<width$} {} {}",
            (index + 1).to_string().cyan(),
            entry.name.bold(),
            "->".dimmed(),
            entry.path
        );
    }
}

/// Run the list command
pub fn run_list(ctx: &Context, json: bool) -> Result<()> {
    let settings = ctx.settings()?;
    let registry = ctx.registry(&settings)?;

    if json {
        let listed: Vec<_> = registry
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| ListedRepository {
                index: index + 1,
                name: &entry.name,
                path: &entry.path,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&listed).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", "Repositories".bold());
    println!();
    print_registry(&registry);
    Ok(())
}
