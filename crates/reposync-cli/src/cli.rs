//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use reposync_core::{Direction, SettingsOverrides};

/// reposync - Copy only what really changed between a build tree and a workspace
#[derive(Parser, Debug)]
#[command(name = "reposync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "REPOSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the build tree
    #[arg(long, global = true, env = "REPOSYNC_BUILD_ROOT")]
    pub build_root: Option<PathBuf>,

    /// Root of the workspace checkouts
    #[arg(long, global = true, env = "REPOSYNC_WORKSPACE_ROOT")]
    pub workspace_root: Option<PathBuf>,

    /// Project manifest listing the repositories
    #[arg(long, global = true, env = "REPOSYNC_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            build_root: self.build_root.clone(),
            workspace_root: self.workspace_root.clone(),
            manifest: self.manifest.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List repositories from the manifest
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Copy changed files of one or more repositories
    ///
    /// Repositories are given by name or by their number in `reposync list`.
    /// Without any, you are prompted for them.
    ///
    /// Examples:
    ///   reposync sync to alpha         # workspace -> build
    ///   reposync sync from 2 3         # build -> workspace, by number
    ///   reposync sync to --dry-run     # pick interactively, write nothing
    Sync {
        /// Direction of the copy
        #[arg(value_enum)]
        direction: DirectionArg,

        /// Repository names or numbers
        repos: Vec<String>,

        /// Scan and verify, but write nothing
        #[arg(long)]
        dry_run: bool,

        /// Output reports as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Manage reposync settings
    Config {
        /// Config action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   reposync completions bash > ~/.local/share/bash-completion/completions/reposync
    ///   reposync completions zsh > ~/.zfunc/_reposync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Settings actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the effective settings
    Show {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a default settings file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Sync direction as typed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Workspace -> build tree
    To,
    /// Build tree -> workspace
    From,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::To => Direction::To,
            DirectionArg::From => Direction::From,
        }
    }
}
