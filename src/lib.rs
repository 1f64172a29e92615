//! API Scenario - ordered end-to-end checks for a users REST API
//!
//! Runs login, list, create, update, validation, latency and delete
//! steps in sequence, threading the access token and created user id
//! from step to step.

pub mod cli;
pub mod commands;
pub mod common;
pub mod http;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::config::Config;
pub use common::{Error, Result};
pub use scenario::{ScenarioPlan, ScenarioReport, ScenarioRunner, StepKind, StepOutcome};
