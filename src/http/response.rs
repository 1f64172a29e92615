//! Captured API responses

use std::time::Duration;

use serde_json::Value;

/// A fully-read response from the API under test
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body; `Null` when the body was empty or not JSON
    pub body: Value,
    /// Time from sending the request until the body was read
    pub elapsed: Duration,
}

impl ApiResponse {
    /// Look up a field in the body by dotted path (see [`lookup`])
    pub fn field(&self, path: &str) -> Option<&Value> {
        lookup(&self.body, path)
    }
}

/// Resolve a dotted path such as `user.id` or `users.0.email`
///
/// Numeric segments index into arrays. An empty path returns the value itself.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Render a JSON value for an error message, keeping it to one short line
pub fn describe(value: Option<&Value>) -> String {
    const MAX: usize = 120;
    match value {
        None => "<missing>".to_string(),
        Some(v) => {
            let text = v.to_string();
            if text.chars().count() > MAX {
                let cut: String = text.chars().take(MAX).collect();
                format!("{cut}...")
            } else {
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_object() {
        let body = json!({"user": {"id": 7, "name": "New User"}});
        assert_eq!(lookup(&body, "user.id"), Some(&json!(7)));
        assert_eq!(lookup(&body, "user.email"), None);
        assert_eq!(lookup(&body, ""), Some(&body));
    }

    #[test]
    fn test_lookup_array_index() {
        let body = json!({"users": [{"id": 1}, {"id": 2}]});
        assert_eq!(lookup(&body, "users.1.id"), Some(&json!(2)));
        assert_eq!(lookup(&body, "users.5"), None);
        assert_eq!(lookup(&body, "users.first"), None);
    }

    #[test]
    fn test_lookup_through_scalar_is_missing() {
        let body = json!({"token": "abc"});
        assert_eq!(lookup(&body, "token.length"), None);
        assert_eq!(lookup(&Value::Null, "success"), None);
    }

    #[test]
    fn test_describe_truncates_long_values() {
        let long = Value::String("x".repeat(500));
        let text = describe(Some(&long));
        assert!(text.ends_with("..."));
        assert!(text.len() < 200);
        assert_eq!(describe(None), "<missing>");
    }
}
