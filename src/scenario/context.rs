//! Session state threaded between scenario steps

use crate::common::{Error, Result};

/// State written by earlier steps and read by later ones
///
/// Created empty at the start of a run and owned by the runner for its
/// duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    /// Bearer token from the authenticate step
    pub access_token: Option<String>,
    /// Id of the user made by the create step
    pub created_user_id: Option<i64>,
    /// Email echoed back by the create step
    pub created_user_email: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bearer token, if login produced a non-empty one
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    /// The created user's id, required to address `/users/{id}`
    pub fn require_user_id(&self) -> Result<i64> {
        self.created_user_id.ok_or_else(|| {
            Error::PreconditionUnmet("no user id; the create step did not succeed".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_empty() {
        let ctx = SessionContext::new();
        assert!(ctx.token().is_none());
        assert!(matches!(
            ctx.require_user_id(),
            Err(Error::PreconditionUnmet(_))
        ));
    }

    #[test]
    fn test_empty_token_counts_as_unset() {
        let ctx = SessionContext {
            access_token: Some(String::new()),
            ..Default::default()
        };
        assert!(ctx.token().is_none());
    }

    #[test]
    fn test_user_id_once_set() {
        let ctx = SessionContext {
            created_user_id: Some(42),
            ..Default::default()
        };
        assert_eq!(ctx.require_user_id().unwrap(), 42);
    }
}
