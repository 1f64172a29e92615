//! CLI command handling
//!
//! Resolves configuration and plan, then runs or lists the scenario.

use std::path::Path;

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::scenario::{ScenarioPlan, ScenarioRunner};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            base_url,
            config,
            scenario,
            fail_fast,
            verbose,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url)?;
            }
            // The flag can only turn fail-fast on; the config file may already have
            let fail_fast = fail_fast || config.run.fail_fast;
            let plan = load_plan(scenario.as_deref())?;

            let runner = ScenarioRunner::new(config, plan)?
                .fail_fast(fail_fast)
                .verbose(verbose);
            let report = runner.run().await;

            if report.passed() {
                Ok(())
            } else {
                Err(Error::ScenarioFailed {
                    failed: report.failed_count(),
                    total: report.steps.len(),
                })
            }
        }

        Commands::Steps { scenario } => {
            let plan = load_plan(scenario.as_deref())?;

            println!("{}", plan.name.bold());
            for (i, step) in plan.steps.iter().enumerate() {
                let requires: Vec<String> = step.requires().iter().map(|v| v.to_string()).collect();
                let requires = if requires.is_empty() {
                    String::new()
                } else {
                    format!(" (needs {})", requires.join(", "))
                };
                println!(
                    "  {}. {} [{}]{}",
                    i + 1,
                    step.title(),
                    step.id().dimmed(),
                    requires.dimmed()
                );
            }

            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn load_plan(path: Option<&Path>) -> Result<ScenarioPlan> {
    match path {
        Some(path) => ScenarioPlan::load(path),
        None => Ok(ScenarioPlan::standard()),
    }
}
