//! CLI command definitions
//!
//! Defines the clap commands for the scenario runner.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the scenario against the API
    Run {
        /// Base URL of the API (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,

        /// Path to a TOML config file (default: platform config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Path to a YAML scenario file (default: all seven steps)
        #[arg(long, short)]
        scenario: Option<PathBuf>,

        /// Skip the remaining steps after the first failure
        #[arg(long)]
        fail_fast: bool,

        /// Verbose output
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the scenario steps in execution order
    Steps {
        /// Path to a YAML scenario file (default: all seven steps)
        #[arg(long, short)]
        scenario: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command asked for verbose output
    pub fn verbose(&self) -> bool {
        matches!(self, Commands::Run { verbose: true, .. })
    }
}
