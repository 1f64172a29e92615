//! Scenario runner implementation
//!
//! Executes the plan's steps in order over one session context. Every step
//! is attempted unless fail-fast is set; a step whose session state is
//! missing fails on its own rather than being skipped.

use std::time::{Duration, Instant};

use colored::Colorize;
use serde_json::json;

use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::http::response::describe;
use crate::http::ApiClient;

use super::context::SessionContext;
use super::expect;
use super::plan::{ScenarioPlan, StepKind};
use super::report::{ScenarioReport, StepOutcome, StepReport};

/// Drives one scenario plan against one API
pub struct ScenarioRunner {
    client: ApiClient,
    config: Config,
    plan: ScenarioPlan,
    fail_fast: bool,
    verbose: bool,
}

impl ScenarioRunner {
    /// Build a runner; the plan is validated before anything is sent
    pub fn new(config: Config, plan: ScenarioPlan) -> Result<Self> {
        plan.validate()?;
        let client = ApiClient::new(&config.base_url, &config.http)?;
        let fail_fast = config.run.fail_fast;

        Ok(Self {
            client,
            config,
            plan,
            fail_fast,
            verbose: false,
        })
    }

    /// Skip the remaining steps after the first failure
    pub fn fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Show per-step timings
    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Run every step in order with a fresh session context
    pub async fn run(&self) -> ScenarioReport {
        let mut ctx = SessionContext::new();
        let mut steps = Vec::with_capacity(self.plan.steps.len());
        let mut aborted = false;

        println!(
            "\n{} {}",
            "Running Scenario:".blue().bold(),
            self.plan.name.white().bold()
        );
        println!("  {}", self.client.base_url().dimmed());
        println!("\n{}", "Steps:".cyan());

        for (i, &kind) in self.plan.steps.iter().enumerate() {
            let number = i + 1;

            if aborted {
                let report = StepReport {
                    number,
                    kind,
                    outcome: StepOutcome::Skipped,
                    elapsed: Duration::ZERO,
                };
                report.print(self.verbose);
                steps.push(report);
                continue;
            }

            tracing::info!(step = number, kind = %kind, "running step");
            let started = Instant::now();
            let result = self.execute_step(kind, &mut ctx).await;
            let elapsed = started.elapsed();

            let outcome = match result {
                Ok(()) => StepOutcome::Passed,
                Err(e) => {
                    tracing::info!(step = number, kind = %kind, error = %e, "step failed");
                    aborted = self.fail_fast;
                    StepOutcome::Failed(e.to_string())
                }
            };

            let report = StepReport {
                number,
                kind,
                outcome,
                elapsed,
            };
            report.print(self.verbose);
            steps.push(report);
        }

        let report = ScenarioReport {
            name: self.plan.name.clone(),
            steps,
            context: ctx,
        };
        report.print_summary();
        report
    }

    /// Execute a single step
    async fn execute_step(&self, kind: StepKind, ctx: &mut SessionContext) -> Result<()> {
        match kind {
            StepKind::Authenticate => self.authenticate(ctx).await,
            StepKind::ListUsers => self.list_users(ctx).await,
            StepKind::CreateUser => self.create_user(ctx).await,
            StepKind::UpdateUser => self.update_user(ctx).await,
            StepKind::ValidateRejection => self.validate_rejection(ctx).await,
            StepKind::PerformanceCheck => self.performance_check(ctx).await,
            StepKind::DeleteUser => self.delete_user(ctx).await,
        }
    }

    /// The bearer token for a request, warning when login never produced one
    fn bearer<'a>(&self, ctx: &'a SessionContext) -> Option<&'a str> {
        let token = ctx.token();
        if token.is_none() {
            tracing::warn!("no access token; sending request without Authorization header");
        }
        token
    }

    async fn authenticate(&self, ctx: &mut SessionContext) -> Result<()> {
        let credentials = &self.config.credentials;
        let body = json!({
            "username": credentials.username,
            "password": credentials.password,
        });

        let response = self.client.post("/auth/login", None, &body).await?;
        expect::status(&response, 200)?;
        expect::bool_field(&response, "success", true)?;

        let token = expect::non_empty(&response, "token")?;
        let token = token
            .as_str()
            .ok_or_else(|| Error::assertion("body.token", "a string", describe(Some(token))))?;

        ctx.access_token = Some(token.to_string());
        Ok(())
    }

    async fn list_users(&self, ctx: &SessionContext) -> Result<()> {
        let response = self.client.get("/users", self.bearer(ctx)).await?;
        expect::status(&response, 200)?;
        expect::non_empty_array(&response, "users")?;
        for key in ["id", "name", "email"] {
            expect::has_key(&response, "users.0", key)?;
        }
        Ok(())
    }

    async fn create_user(&self, ctx: &mut SessionContext) -> Result<()> {
        let fixtures = &self.config.fixtures;
        let body = json!({
            "name": fixtures.new_user_name,
            "email": fixtures.new_user_email,
            "role": fixtures.new_user_role,
        });

        let response = self.client.post("/users", self.bearer(ctx), &body).await?;
        expect::status(&response, 201)?;
        expect::bool_field(&response, "success", true)?;
        expect::str_field(&response, "user.name", &fixtures.new_user_name)?;
        expect::str_field(&response, "user.email", &fixtures.new_user_email)?;

        let id = expect::non_empty(&response, "user.id")?;
        let id = expect::as_user_id(id)
            .ok_or_else(|| Error::assertion("body.user.id", "an integer id", describe(Some(id))))?;

        tracing::debug!(user_id = id, "created user");
        ctx.created_user_id = Some(id);
        ctx.created_user_email = Some(fixtures.new_user_email.clone());
        Ok(())
    }

    async fn update_user(&self, ctx: &SessionContext) -> Result<()> {
        let id = ctx.require_user_id()?;
        let new_name = &self.config.fixtures.updated_name;
        let body = json!({ "name": new_name });

        let response = self
            .client
            .put(&format!("/users/{id}"), self.bearer(ctx), &body)
            .await?;
        expect::status(&response, 200)?;
        expect::bool_field(&response, "success", true)?;
        expect::str_field(&response, "user.name", new_name)?;
        expect::id_field(&response, "user.id", id)?;

        // Only the name may change
        if let (Some(_), Some(email)) = (response.field("user.email"), &ctx.created_user_email) {
            expect::str_field(&response, "user.email", email)?;
        }
        Ok(())
    }

    async fn validate_rejection(&self, ctx: &SessionContext) -> Result<()> {
        let body = json!({ "email": self.config.fixtures.invalid_email });

        let response = self.client.post("/users", self.bearer(ctx), &body).await?;
        expect::status(&response, 400)?;
        expect::bool_field(&response, "success", false)?;
        expect::has_key(&response, "errors", "email")?;
        Ok(())
    }

    async fn performance_check(&self, ctx: &SessionContext) -> Result<()> {
        let limit = Duration::from_millis(self.config.thresholds.max_latency_ms);

        let response = self.client.get("/users", self.bearer(ctx)).await?;
        expect::status(&response, 200)?;
        expect::faster_than(&response, limit)?;
        Ok(())
    }

    async fn delete_user(&self, ctx: &SessionContext) -> Result<()> {
        let id = ctx.require_user_id()?;
        let path = format!("/users/{id}");
        let token = self.bearer(ctx);

        let deleted = self.client.delete(&path, token).await?;
        expect::status(&deleted, 200).map_err(|e| e.context("DELETE"))?;
        expect::bool_field(&deleted, "success", true).map_err(|e| e.context("DELETE"))?;

        let fetched = self.client.get(&path, token).await?;
        expect::status(&fetched, 404).map_err(|e| e.context("GET after DELETE"))?;
        Ok(())
    }
}
