//! Ordered API scenario
//!
//! A plan lists the steps, the runner executes them in order over one
//! session context, and the report records what each step did.

pub mod context;
pub mod expect;
pub mod plan;
pub mod report;
mod runner;

pub use context::SessionContext;
pub use plan::{ScenarioPlan, SessionValue, StepKind};
pub use report::{ScenarioReport, StepOutcome, StepReport};
pub use runner::ScenarioRunner;
