//! Scenario plan: the ordered list of steps
//!
//! A plan is either the standard seven-step scenario or one loaded from a
//! YAML file. Either way it is validated so every step runs after the steps
//! that produce the session state it reads.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::common::{Error, Result};

/// Session state a step reads or writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionValue {
    AccessToken,
    CreatedUserId,
}

impl fmt::Display for SessionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionValue::AccessToken => write!(f, "access token"),
            SessionValue::CreatedUserId => write!(f, "created user id"),
        }
    }
}

/// One step of the users API scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// `POST /auth/login`
    Authenticate,
    /// `GET /users`
    ListUsers,
    /// `POST /users` with a valid payload
    CreateUser,
    /// `PUT /users/{id}`
    UpdateUser,
    /// `POST /users` with an invalid payload
    ValidateRejection,
    /// `GET /users` under a latency bound
    PerformanceCheck,
    /// `DELETE /users/{id}` then `GET /users/{id}`
    DeleteUser,
}

impl StepKind {
    /// Every step in declared order
    pub const ALL: [StepKind; 7] = [
        StepKind::Authenticate,
        StepKind::ListUsers,
        StepKind::CreateUser,
        StepKind::UpdateUser,
        StepKind::ValidateRejection,
        StepKind::PerformanceCheck,
        StepKind::DeleteUser,
    ];

    /// Identifier used in scenario files
    pub fn id(self) -> &'static str {
        match self {
            StepKind::Authenticate => "authenticate",
            StepKind::ListUsers => "list_users",
            StepKind::CreateUser => "create_user",
            StepKind::UpdateUser => "update_user",
            StepKind::ValidateRejection => "validate_rejection",
            StepKind::PerformanceCheck => "performance_check",
            StepKind::DeleteUser => "delete_user",
        }
    }

    /// Human-readable title for output
    pub fn title(self) -> &'static str {
        match self {
            StepKind::Authenticate => "Authenticate",
            StepKind::ListUsers => "List users",
            StepKind::CreateUser => "Create user",
            StepKind::UpdateUser => "Update user",
            StepKind::ValidateRejection => "Validate rejection",
            StepKind::PerformanceCheck => "Performance check",
            StepKind::DeleteUser => "Delete user",
        }
    }

    /// Session values that must be produced before this step
    pub fn requires(self) -> &'static [SessionValue] {
        match self {
            StepKind::Authenticate => &[],
            StepKind::ListUsers | StepKind::CreateUser => &[SessionValue::AccessToken],
            StepKind::ValidateRejection | StepKind::PerformanceCheck => {
                &[SessionValue::AccessToken]
            }
            StepKind::UpdateUser | StepKind::DeleteUser => {
                &[SessionValue::AccessToken, SessionValue::CreatedUserId]
            }
        }
    }

    /// Session values this step writes on success
    pub fn provides(self) -> &'static [SessionValue] {
        match self {
            StepKind::Authenticate => &[SessionValue::AccessToken],
            StepKind::CreateUser => &[SessionValue::CreatedUserId],
            _ => &[],
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// An ordered scenario
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScenarioPlan {
    /// Name shown in output
    pub name: String,
    /// Steps in execution order
    pub steps: Vec<StepKind>,
}

impl ScenarioPlan {
    /// The full users API scenario in declared order
    pub fn standard() -> Self {
        Self {
            name: "Users API".to_string(),
            steps: StepKind::ALL.to_vec(),
        }
    }

    /// Load and validate a plan from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a plan from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let plan: Self = serde_yaml::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check every step's requirements are provided by an earlier step
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(Error::Config(format!(
                "Scenario '{}' has no steps",
                self.name
            )));
        }

        let mut available: Vec<SessionValue> = Vec::new();
        for (i, step) in self.steps.iter().enumerate() {
            if let Some(missing) = step.requires().iter().find(|v| !available.contains(*v)) {
                return Err(Error::Config(format!(
                    "Step {} '{}' needs the {} but no earlier step provides it",
                    i + 1,
                    step,
                    missing
                )));
            }
            available.extend_from_slice(step.provides());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_plan_is_valid() {
        let plan = ScenarioPlan::standard();
        assert_eq!(plan.steps.len(), 7);
        assert_eq!(plan.steps[0], StepKind::Authenticate);
        assert_eq!(plan.steps[6], StepKind::DeleteUser);
        plan.validate().unwrap();
    }

    #[test]
    fn test_parse_yaml_plan() {
        let plan = ScenarioPlan::from_yaml(
            "name: smoke\nsteps: [authenticate, list_users, performance_check]\n",
        )
        .unwrap();
        assert_eq!(plan.name, "smoke");
        assert_eq!(
            plan.steps,
            vec![
                StepKind::Authenticate,
                StepKind::ListUsers,
                StepKind::PerformanceCheck
            ]
        );
    }

    #[test]
    fn test_reordered_plan_is_rejected() {
        let plan = ScenarioPlan {
            name: "bad".to_string(),
            steps: vec![
                StepKind::Authenticate,
                StepKind::UpdateUser,
                StepKind::CreateUser,
            ],
        };
        let err = plan.validate().unwrap_err();
        match err {
            Error::Config(msg) => {
                assert!(msg.contains("update_user"), "{msg}");
                assert!(msg.contains("created user id"), "{msg}");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_without_login_is_rejected() {
        let err = ScenarioPlan::from_yaml("name: x\nsteps: [list_users]\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_step_is_yaml_error() {
        let err = ScenarioPlan::from_yaml("name: x\nsteps: [authenticate, reboot]\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }

    #[test]
    fn test_empty_plan_is_rejected() {
        let err = ScenarioPlan::from_yaml("name: x\nsteps: []\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_ids_round_trip_through_yaml() {
        for step in StepKind::ALL {
            let parsed: StepKind = serde_yaml::from_str(step.id()).unwrap();
            assert_eq!(parsed, step);
        }
    }
}
