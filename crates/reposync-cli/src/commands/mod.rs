//! Command implementations for reposync-cli

pub mod completions;
pub mod config;
pub mod list;
pub mod sync;

pub use completions::run_completions;
pub use config::{run_config_init, run_config_show};
pub use list::run_list;
pub use sync::run_sync;
