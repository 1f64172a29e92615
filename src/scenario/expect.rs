//! Response assertions
//!
//! Each check returns an `Error::Assertion` naming the field, the expected
//! value and what the response actually held.

use std::time::Duration;

use serde_json::Value;

use crate::common::{Error, Result};
use crate::http::response::describe;
use crate::http::ApiResponse;

/// Assert the HTTP status code
pub fn status(response: &ApiResponse, expected: u16) -> Result<()> {
    if response.status != expected {
        return Err(Error::assertion("status", expected, response.status));
    }
    Ok(())
}

/// Assert a boolean field equals `expected`
pub fn bool_field(response: &ApiResponse, path: &str, expected: bool) -> Result<()> {
    let actual = response.field(path);
    if actual.and_then(Value::as_bool) != Some(expected) {
        return Err(Error::assertion(
            format!("body.{path}"),
            expected,
            describe(actual),
        ));
    }
    Ok(())
}

/// Assert a string field equals `expected`
pub fn str_field(response: &ApiResponse, path: &str, expected: &str) -> Result<()> {
    let actual = response.field(path);
    if actual.and_then(Value::as_str) != Some(expected) {
        return Err(Error::assertion(
            format!("body.{path}"),
            format!("\"{expected}\""),
            describe(actual),
        ));
    }
    Ok(())
}

/// Assert a field is present and not null, empty string, empty array or empty object
pub fn non_empty<'a>(response: &'a ApiResponse, path: &str) -> Result<&'a Value> {
    let actual = response.field(path);
    match actual {
        Some(value) if !is_empty(value) => Ok(value),
        _ => Err(Error::assertion(
            format!("body.{path}"),
            "a non-empty value",
            describe(actual),
        )),
    }
}

/// Assert a field is an array with at least one element
pub fn non_empty_array<'a>(response: &'a ApiResponse, path: &str) -> Result<&'a [Value]> {
    let actual = response.field(path);
    match actual.and_then(Value::as_array) {
        Some(items) if !items.is_empty() => Ok(items),
        _ => Err(Error::assertion(
            format!("body.{path}"),
            "a non-empty array",
            describe(actual),
        )),
    }
}

/// Assert an object field contains `key`
pub fn has_key(response: &ApiResponse, path: &str, key: &str) -> Result<()> {
    let actual = response.field(path);
    let found = actual
        .and_then(Value::as_object)
        .is_some_and(|map| map.contains_key(key));
    if !found {
        return Err(Error::assertion(
            format!("body.{path}"),
            format!("an object with key '{key}'"),
            describe(actual),
        ));
    }
    Ok(())
}

/// Assert a field holds the user id `expected`
pub fn id_field(response: &ApiResponse, path: &str, expected: i64) -> Result<()> {
    let actual = response.field(path);
    if actual.and_then(as_user_id) != Some(expected) {
        return Err(Error::assertion(
            format!("body.{path}"),
            expected,
            describe(actual),
        ));
    }
    Ok(())
}

/// Assert the round trip finished strictly within `limit`
pub fn faster_than(response: &ApiResponse, limit: Duration) -> Result<()> {
    if response.elapsed >= limit {
        return Err(Error::assertion(
            "response time",
            format!("< {} ms", limit.as_millis()),
            format!("{} ms", response.elapsed.as_millis()),
        ));
    }
    Ok(())
}

/// Interpret a JSON id as an integer; numeric strings are accepted
pub fn as_user_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
