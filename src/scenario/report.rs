//! Scenario results

use std::time::Duration;

use colored::Colorize;

use super::context::SessionContext;
use super::plan::StepKind;

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
    /// Not executed because an earlier step failed under fail-fast
    Skipped,
}

/// Result of one step
#[derive(Debug, Clone)]
pub struct StepReport {
    /// 1-based position in the plan
    pub number: usize,
    pub kind: StepKind,
    pub outcome: StepOutcome,
    /// Wall time spent in the step, including every request it made
    pub elapsed: Duration,
}

impl StepReport {
    pub fn passed(&self) -> bool {
        self.outcome == StepOutcome::Passed
    }

    /// Print the one-line result
    pub fn print(&self, verbose: bool) {
        let label = format!("Step {}: {}", self.number, self.kind.title());
        let timing = if verbose {
            format!(" ({} ms)", self.elapsed.as_millis())
        } else {
            String::new()
        };

        match &self.outcome {
            StepOutcome::Passed => {
                println!("  {} {}{}", "✓".green(), label, timing.dimmed());
            }
            StepOutcome::Failed(error) => {
                println!("  {} {}{}", "✗".red(), label, timing.dimmed());
                println!("      {}", error.red());
            }
            StepOutcome::Skipped => {
                println!("  {} {} {}", "-".yellow(), label, "(skipped)".dimmed());
            }
        }
    }
}

/// Result of a whole scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    /// Session state as the last step left it
    pub context: SessionContext,
}

impl ScenarioReport {
    /// True when every step passed
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepReport::passed)
    }

    /// Steps that did not pass, including skipped ones
    pub fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.passed()).count()
    }

    /// Report for a given step kind, if the plan contained it
    pub fn step(&self, kind: StepKind) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.kind == kind)
    }

    /// Print the closing summary line
    pub fn print_summary(&self) {
        if self.passed() {
            println!(
                "\n{} {}\n",
                "✓".green().bold(),
                format!("All {} steps passed", self.steps.len()).green().bold()
            );
        } else {
            println!(
                "\n{} {}\n",
                "✗".red().bold(),
                format!(
                    "{} of {} steps did not pass",
                    self.failed_count(),
                    self.steps.len()
                )
                .red()
                .bold()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(number: usize, kind: StepKind, outcome: StepOutcome) -> StepReport {
        StepReport {
            number,
            kind,
            outcome,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_counts() {
        let report = ScenarioReport {
            name: "t".to_string(),
            steps: vec![
                step(1, StepKind::Authenticate, StepOutcome::Passed),
                step(2, StepKind::ListUsers, StepOutcome::Failed("status".into())),
                step(3, StepKind::PerformanceCheck, StepOutcome::Skipped),
            ],
            context: SessionContext::default(),
        };

        assert!(!report.passed());
        assert_eq!(report.failed_count(), 2);
        assert!(report.step(StepKind::Authenticate).unwrap().passed());
        assert!(report.step(StepKind::DeleteUser).is_none());
    }
}
